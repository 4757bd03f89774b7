//! ## Temporal Variable Transformers
//!
//! This module provides transformers for recoding time-like columns.
//!
//! ### Available Transformers
//!
//! - [`TemporalVariableTransformer`]: Replaces absolute time-like columns (e.g. a year of
//!   construction) with the elapsed value relative to a reference column (e.g. the year
//!   of sale), computed as `reference - column`.
//!
//! Each transformer returns a new [`Dataset`] with the modified columns.
//! Errors are returned as `FeaturePrepError`, and results are wrapped in `FeaturePrepResult`.

use arrow::array::{Array, Float64Array};
use arrow::compute::kernels::numeric::sub;
use arrow::datatypes::{DataType, Field};

use crate::dataset::{Columns, Dataset};
use crate::exceptions::{FeaturePrepError, FeaturePrepResult};
use crate::impl_transformer;

/// Validates that a column exists and is of a plain numeric type (Int64 or Float64).
fn validate_numeric_column(dataset: &Dataset, col_name: &str) -> FeaturePrepResult<()> {
    let column = dataset.column(col_name)?;
    match column.data_type() {
        DataType::Int64 | DataType::Float64 => Ok(()),
        dt => Err(FeaturePrepError::InvalidParameter(format!(
            "Column '{}' must be a numeric type (Int64 or Float64), but found {:?}",
            col_name, dt
        ))),
    }
}

/// Replaces each target column with `reference - column`, turning absolute time-like
/// quantities into elapsed ones. The reference column itself is carried through unchanged,
/// so it can be dropped by a later step once every difference has been computed.
pub struct TemporalVariableTransformer {
    columns: Vec<String>,
    reference: String,
}

impl TemporalVariableTransformer {
    /// Create a new temporal transformer for the given columns and reference column.
    pub fn new(columns: impl Into<Columns>, reference: impl Into<String>) -> Self {
        Self {
            columns: columns.into().into_vec(),
            reference: reference.into(),
        }
    }

    /// This transformer is stateless, so fit only validates the target and reference columns.
    pub fn fit(
        &mut self,
        dataset: &Dataset,
        _target: Option<&Float64Array>,
    ) -> FeaturePrepResult<()> {
        self.validate(dataset)
    }

    /// Validates that the reference column and each target column exist, are numeric,
    /// and share the same data type.
    fn validate(&self, dataset: &Dataset) -> FeaturePrepResult<()> {
        validate_numeric_column(dataset, &self.reference)?;
        let reference_type = dataset.column(&self.reference)?.data_type().clone();
        for col_name in &self.columns {
            validate_numeric_column(dataset, col_name)?;
            let column_type = dataset.column(col_name)?.data_type().clone();
            if column_type != reference_type {
                return Err(FeaturePrepError::InvalidParameter(format!(
                    "Column '{}' has type {:?} but reference column '{}' has type {:?}",
                    col_name, column_type, self.reference, reference_type
                )));
            }
        }
        Ok(())
    }

    /// Returns a new dataset where each target column holds `reference - column`.
    /// Every difference is computed from the input dataset, and missing values in
    /// either operand produce a missing difference.
    pub fn transform(&self, dataset: &Dataset) -> FeaturePrepResult<Dataset> {
        self.validate(dataset)?;
        let reference = dataset.column(&self.reference)?;
        let schema = dataset.schema();
        let mut fields = Vec::with_capacity(dataset.num_columns());
        let mut columns = Vec::with_capacity(dataset.num_columns());
        for (field, column) in schema.fields().iter().zip(dataset.record_batch().columns()) {
            if self.columns.contains(field.name()) {
                let elapsed = sub(reference, column)?;
                fields.push(Field::new(field.name(), elapsed.data_type().clone(), true));
                columns.push(elapsed);
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
impl_transformer!(TemporalVariableTransformer);
