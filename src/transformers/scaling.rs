//! ## Scaling Transformers
//!
//! This module provides transformers for rescaling numeric features.
//!
//! ### Available Transformers
//!
//! - [`MinMaxScaler`]: Rescales numeric columns to the unit interval using the minimum
//!   and maximum observed in the training data.
//!
//! Each transformer returns a new [`Dataset`] with the rescaled features.
//! Errors are returned as `FeaturePrepError`, and results are wrapped in `FeaturePrepResult`.

use std::collections::HashMap;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array};
use arrow::compute::kernels::cast::cast;
use arrow::datatypes::{DataType, Field};
use tracing::debug;

use crate::dataset::{validate_columns, Columns, Dataset};
use crate::exceptions::{FeaturePrepError, FeaturePrepResult};
use crate::impl_transformer;

/// Reads a numeric column as Float64 values, casting Int64 columns.
fn numeric_as_f64(dataset: &Dataset, col_name: &str) -> FeaturePrepResult<Float64Array> {
    let column = dataset.column(col_name)?;
    match column.data_type() {
        DataType::Float64 => Ok(dataset.f64_column(col_name)?.clone()),
        DataType::Int64 => {
            let cast_column = cast(column, &DataType::Float64)?;
            cast_column
                .as_any()
                .downcast_ref::<Float64Array>()
                .cloned()
                .ok_or_else(|| {
                    FeaturePrepError::InvalidParameter(format!(
                        "Column '{}' could not be cast to Float64",
                        col_name
                    ))
                })
        }
        dt => Err(FeaturePrepError::InvalidParameter(format!(
            "Column '{}' must be a numeric type (Int64 or Float64), but found {:?}",
            col_name, dt
        ))),
    }
}

/// Rescales the target columns with `(x - min) / (max - min)`, where the minimum and
/// maximum are learned from the training data. Rescaled columns are always emitted as
/// Float64, so Int64 columns change type.
pub struct MinMaxScaler {
    columns: Vec<String>,
    ranges: Option<HashMap<String, (f64, f64)>>,
}

impl MinMaxScaler {
    /// Create a new min-max scaler for the given column or columns.
    pub fn new(columns: impl Into<Columns>) -> Self {
        Self {
            columns: columns.into().into_vec(),
            ranges: None,
        }
    }

    /// For each target column, record the minimum and maximum of the non-missing
    /// training values.
    pub fn fit(
        &mut self,
        dataset: &Dataset,
        _target: Option<&Float64Array>,
    ) -> FeaturePrepResult<()> {
        validate_columns(dataset, &self.columns)?;
        let mut ranges = HashMap::new();
        for col_name in &self.columns {
            let array = numeric_as_f64(dataset, col_name)?;
            let mut bounds: Option<(f64, f64)> = None;
            for value in array.iter().flatten() {
                bounds = Some(match bounds {
                    Some((min, max)) => (min.min(value), max.max(value)),
                    None => (value, value),
                });
            }
            let (min, max) = bounds.ok_or_else(|| {
                FeaturePrepError::InvalidParameter(format!(
                    "Column '{}' has no non-missing values to learn a scaling range from",
                    col_name
                ))
            })?;
            debug!("column '{}' scaling range [{}, {}]", col_name, min, max);
            ranges.insert(col_name.clone(), (min, max));
        }
        self.ranges = Some(ranges);
        Ok(())
    }

    /// Returns a new dataset with the target columns rescaled to Float64. Values equal
    /// to the fitted minimum map to 0 and values equal to the fitted maximum map to 1;
    /// values outside the fitted range extrapolate past the unit interval. Columns that
    /// were constant during fit map to 0. Missing values stay missing.
    pub fn transform(&self, dataset: &Dataset) -> FeaturePrepResult<Dataset> {
        let ranges = self.ranges.as_ref().ok_or(FeaturePrepError::FitNotCalled)?;
        validate_columns(dataset, &self.columns)?;
        let schema = dataset.schema();
        let mut fields = Vec::with_capacity(dataset.num_columns());
        let mut columns = Vec::with_capacity(dataset.num_columns());
        for (field, column) in schema.fields().iter().zip(dataset.record_batch().columns()) {
            match ranges.get(field.name()) {
                Some(&(min, max)) => {
                    let array = numeric_as_f64(dataset, field.name())?;
                    let range = max - min;
                    let scaled: Float64Array = array
                        .iter()
                        .map(|value| {
                            value.map(|v| if range > 0.0 { (v - min) / range } else { 0.0 })
                        })
                        .collect();
                    fields.push(Field::new(field.name(), DataType::Float64, true));
                    columns.push(Arc::new(scaled) as ArrayRef);
                }
                None => {
                    fields.push(field.as_ref().clone());
                    columns.push(column.clone());
                }
            }
        }
        Dataset::try_new(fields, columns)
    }

    fn inherent_is_stateful(&self) -> bool {
        true
    }
}

// Implement the Transformer trait for the transformers in this module.
impl_transformer!(MinMaxScaler);
