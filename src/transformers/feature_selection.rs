//! ## Feature Selection Transformers
//!
//! This module provides transformers for removing features from a dataset.
//!
//! ### Available Transformers
//!
//! - [`DropColumns`]: Removes a fixed set of columns, keeping the rest in their
//!   original order.
//!
//! Each transformer returns a new [`Dataset`] with the selected features.
//! Errors are returned as `FeaturePrepError`, and results are wrapped in `FeaturePrepResult`.

use arrow::array::Float64Array;

use crate::dataset::{validate_columns, Columns, Dataset};
use crate::exceptions::{FeaturePrepError, FeaturePrepResult};
use crate::impl_transformer;

/// Removes the configured columns from the dataset. The remaining columns keep their
/// relative order.
pub struct DropColumns {
    columns: Vec<String>,
}

impl DropColumns {
    /// Create a new transformer that drops the given column or columns.
    pub fn new(columns: impl Into<Columns>) -> Self {
        Self {
            columns: columns.into().into_vec(),
        }
    }

    /// Validates that every configured column exists. No state is recorded.
    pub fn fit(
        &mut self,
        dataset: &Dataset,
        _target: Option<&Float64Array>,
    ) -> FeaturePrepResult<()> {
        validate_columns(dataset, &self.columns)
    }

    /// Returns a new dataset without the configured columns.
    pub fn transform(&self, dataset: &Dataset) -> FeaturePrepResult<Dataset> {
        validate_columns(dataset, &self.columns)?;
        let schema = dataset.schema();
        let mut fields = Vec::new();
        let mut columns = Vec::new();
        for (field, column) in schema.fields().iter().zip(dataset.record_batch().columns()) {
            if !self.columns.contains(field.name()) {
                fields.push(field.as_ref().clone());
                columns.push(column.clone());
            }
        }
        if fields.is_empty() {
            return Err(FeaturePrepError::InvalidParameter(
                "Dropping these columns would result in an empty dataset".to_string(),
            ));
        }
        Dataset::try_new(fields, columns)
    }

    fn inherent_is_stateful(&self) -> bool {
        false
    }
}

// Implement the Transformer trait for the transformers in this module.
impl_transformer!(DropColumns);
