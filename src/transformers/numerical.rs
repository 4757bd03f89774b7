//! ## Numerical Transformation Transformers
//!
//! This module provides transformers for applying mathematical transformations to
//! numerical features.
//!
//! ### Available Transformers
//!
//! - [`LogTransformer`]: Applies the natural logarithm transformation (requires strictly
//!   positive values).
//!
//! Each transformer returns a new [`Dataset`] with transformed features.
//! Errors are returned as `FeaturePrepError`, and results are wrapped in `FeaturePrepResult`.

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array};
use arrow::compute::kernels::arity::unary;
use arrow::datatypes::{DataType, Field};

use crate::dataset::{Columns, Dataset};
use crate::exceptions::{FeaturePrepError, FeaturePrepResult};
use crate::impl_transformer;

/// Applies the natural logarithm transformation to the values in the columns.
/// Needs all values to be present and strictly positive in every dataset it transforms.
pub struct LogTransformer {
    columns: Vec<String>,
}

impl LogTransformer {
    /// Create a new log transformer for the given column or columns.
    pub fn new(columns: impl Into<Columns>) -> Self {
        Self {
            columns: columns.into().into_vec(),
        }
    }

    /// This transformer is stateless, so fit only validates that the target columns
    /// exist and are Float64.
    pub fn fit(
        &mut self,
        dataset: &Dataset,
        _target: Option<&Float64Array>,
    ) -> FeaturePrepResult<()> {
        for col_name in &self.columns {
            dataset.f64_column(col_name)?;
        }
        Ok(())
    }

    /// Checks that every value in each target column is strictly positive.
    /// Missing values and zero or negative values violate the log domain.
    fn validate(&self, dataset: &Dataset) -> FeaturePrepResult<()> {
        let mut offending = Vec::new();
        for col_name in &self.columns {
            let array = dataset.f64_column(col_name)?;
            let all_positive = array
                .iter()
                .all(|value| matches!(value, Some(v) if v > 0.0));
            if !all_positive {
                offending.push(col_name.clone());
            }
        }
        if offending.is_empty() {
            Ok(())
        } else {
            Err(FeaturePrepError::InvalidDomain { columns: offending })
        }
    }

    /// Returns a new dataset with the target columns replaced by their natural logarithm.
    /// If any target column contains a missing, zero, or negative value, the transform
    /// fails with `FeaturePrepError::InvalidDomain` naming every offending column, and
    /// no column is transformed.
    pub fn transform(&self, dataset: &Dataset) -> FeaturePrepResult<Dataset> {
        self.validate(dataset)?;
        let schema = dataset.schema();
        let mut fields = Vec::with_capacity(dataset.num_columns());
        let mut columns = Vec::with_capacity(dataset.num_columns());
        for (field, column) in schema.fields().iter().zip(dataset.record_batch().columns()) {
            if self.columns.contains(field.name()) {
                let array = dataset.f64_column(field.name())?;
                let logged: Float64Array = unary(array, f64::ln);
                fields.push(Field::new(field.name(), DataType::Float64, true));
                columns.push(Arc::new(logged) as ArrayRef);
            } else {
                fields.push(field.as_ref().clone());
                columns.push(column.clone());
            }
        }
        Dataset::try_new(fields, columns)
    }

    fn inherent_is_stateful(&self) -> bool {
        false
    }
}

// Implement the Transformer trait for the transformers in this module.
impl_transformer!(LogTransformer);
