//! ## Transformers for Imputing Missing Values
//!
//! This module provides the imputers for dealing with missing values.
//!
//! Currently, the following transformers are implemented:
//!
//! - **CategoricalImputer**: Replaces missing values in categorical columns with the fixed
//!   sentinel label [`MISSING_LABEL`].
//! - **NumericalImputer**: Replaces missing values in numeric columns with the most frequent
//!   value learned from the training data.
//!
//! Each transformer returns a new [`Dataset`] with the applied imputation strategy, leaving
//! the input dataset untouched.
//! Errors are returned as `FeaturePrepError` and results are wrapped in `FeaturePrepResult`.

use std::collections::HashMap;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array, StringArray};
use arrow::datatypes::Field;
use tracing::debug;

use crate::dataset::{validate_columns, Columns, Dataset};
use crate::exceptions::{FeaturePrepError, FeaturePrepResult};
use crate::impl_transformer;

/// The sentinel label substituted for missing categorical values.
pub const MISSING_LABEL: &str = "Missing";

/// Generic helper function to apply a per-column fill to a set of target columns.
/// For each field in the dataset, if its name is in `target_cols` and `fill` produces a
/// replacement array, the column is replaced; otherwise, the original column is retained.
fn apply_imputation<F>(
    dataset: &Dataset,
    target_cols: &[String],
    fill: F,
) -> FeaturePrepResult<Dataset>
where
    F: Fn(&str) -> FeaturePrepResult<Option<ArrayRef>>,
{
    let schema = dataset.schema();
    let mut fields = Vec::with_capacity(dataset.num_columns());
    let mut columns = Vec::with_capacity(dataset.num_columns());
    for (field, column) in schema.fields().iter().zip(dataset.record_batch().columns()) {
        let replacement = if target_cols.contains(field.name()) {
            fill(field.name())?
        } else {
            None
        };
        match replacement {
            Some(array) => {
                fields.push(Field::new(field.name(), array.data_type().clone(), true));
                columns.push(array);
            }
            None => {
                fields.push(field.as_ref().clone());
                columns.push(column.clone());
            }
        }
    }
    Dataset::try_new(fields, columns)
}

/// Returns the most frequent non-missing value in the column, breaking ties in favor of
/// the value encountered first in row order. Values are identified by their bit pattern,
/// so the fill value round-trips exactly. Returns `None` for an all-missing column.
fn column_mode(array: &Float64Array) -> Option<f64> {
    let mut counts: HashMap<u64, (usize, usize)> = HashMap::new();
    for (row, value) in array.iter().enumerate() {
        if let Some(value) = value {
            let entry = counts.entry(value.to_bits()).or_insert((0, row));
            entry.0 += 1;
        }
    }
    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(bits, _)| f64::from_bits(bits))
}

/// Replaces missing values in categorical columns with the sentinel label [`MISSING_LABEL`].
pub struct CategoricalImputer {
    columns: Vec<String>,
}

impl CategoricalImputer {
    /// Create a new categorical imputer for the given column or columns.
    pub fn new(columns: impl Into<Columns>) -> Self {
        Self {
            columns: columns.into().into_vec(),
        }
    }

    /// This transformer is stateless, so fit only validates that the target columns exist.
    pub fn fit(
        &mut self,
        dataset: &Dataset,
        _target: Option<&Float64Array>,
    ) -> FeaturePrepResult<()> {
        validate_columns(dataset, &self.columns)
    }

    /// Returns a new dataset where, for each target column, missing values are replaced
    /// with the sentinel label.
    pub fn transform(&self, dataset: &Dataset) -> FeaturePrepResult<Dataset> {
        validate_columns(dataset, &self.columns)?;
        apply_imputation(dataset, &self.columns, |name| {
            let array = dataset.str_column(name)?;
            let filled: StringArray = array
                .iter()
                .map(|value| Some(value.unwrap_or(MISSING_LABEL)))
                .collect();
            Ok(Some(Arc::new(filled) as ArrayRef))
        })
    }

    fn inherent_is_stateful(&self) -> bool {
        false
    }
}

/// Replaces missing values in numeric columns with the most frequent value observed
/// when the imputer was fitted.
pub struct NumericalImputer {
    columns: Vec<String>,
    impute_values: Option<HashMap<String, f64>>,
}

impl NumericalImputer {
    /// Create a new numerical imputer for the given column or columns.
    pub fn new(columns: impl Into<Columns>) -> Self {
        Self {
            columns: columns.into().into_vec(),
            impute_values: None,
        }
    }

    /// For each target column, learn the most frequent value of the training data.
    /// Ties are broken in favor of the value encountered first in row order.
    pub fn fit(
        &mut self,
        dataset: &Dataset,
        _target: Option<&Float64Array>,
    ) -> FeaturePrepResult<()> {
        validate_columns(dataset, &self.columns)?;
        let mut impute_values = HashMap::new();
        for col_name in &self.columns {
            let array = dataset.f64_column(col_name)?;
            let fill = column_mode(array).ok_or_else(|| {
                FeaturePrepError::InvalidParameter(format!(
                    "Column '{}' has no non-missing values to learn a fill value from",
                    col_name
                ))
            })?;
            debug!("learned fill value {} for column '{}'", fill, col_name);
            impute_values.insert(col_name.clone(), fill);
        }
        self.impute_values = Some(impute_values);
        Ok(())
    }

    /// Returns a new dataset where, for each target column, missing values are replaced
    /// with the fill value learned during fit.
    pub fn transform(&self, dataset: &Dataset) -> FeaturePrepResult<Dataset> {
        let impute_values = self
            .impute_values
            .as_ref()
            .ok_or(FeaturePrepError::FitNotCalled)?;
        validate_columns(dataset, &self.columns)?;
        apply_imputation(dataset, &self.columns, |name| match impute_values.get(name) {
            Some(&fill) => {
                let array = dataset.f64_column(name)?;
                let filled: Float64Array = array
                    .iter()
                    .map(|value| Some(value.unwrap_or(fill)))
                    .collect();
                Ok(Some(Arc::new(filled) as ArrayRef))
            }
            None => Ok(None),
        })
    }

    fn inherent_is_stateful(&self) -> bool {
        true
    }
}

// Implement the Transformer trait for the imputers in this module.
impl_transformer!(CategoricalImputer);
impl_transformer!(NumericalImputer);
