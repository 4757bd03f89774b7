//! ## Categorical Encoding Transformers
//!
//! This module provides encoders that turn free-form category labels into a closed,
//! numeric-friendly vocabulary.
//!
//! The encoders include:
//!
//! - **RareLabelEncoder**: Groups infrequent categories into the single bucket label
//!   [`RARE_LABEL`], based on relative frequencies observed in the training data.
//! - **TargetMeanEncoder**: Replaces categories with 0-based integer ranks ordered by
//!   the mean of the target variable for each category.
//!
//! Each encoder exposes a similar API with a constructor, a `fit` method to learn the
//! necessary mappings from a training dataset, and a `transform` method that applies
//! the encoding and returns a new [`Dataset`].
//! Errors are returned as `FeaturePrepError` and results are wrapped in `FeaturePrepResult`.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::Field;
use tracing::debug;

use crate::dataset::{validate_columns, Columns, Dataset};
use crate::exceptions::{FeaturePrepError, FeaturePrepResult};
use crate::impl_transformer;

/// The bucket label assigned to infrequent category values.
pub const RARE_LABEL: &str = "Rare";

/// The default relative frequency below which a category label is grouped as rare.
pub const DEFAULT_TOLERANCE: f64 = 0.05;

/// Generic helper function to apply per-column replacement arrays to a set of target
/// columns. For each field in the dataset, if its name is in `target_cols` and
/// `encoded` produces a replacement array, the column is replaced; otherwise, the
/// original column is retained.
fn apply_encoding<F>(
    dataset: &Dataset,
    target_cols: &[String],
    encoded: F,
) -> FeaturePrepResult<Dataset>
where
    F: Fn(&str) -> Option<ArrayRef>,
{
    let schema = dataset.schema();
    let mut fields = Vec::with_capacity(dataset.num_columns());
    let mut columns = Vec::with_capacity(dataset.num_columns());
    for (field, column) in schema.fields().iter().zip(dataset.record_batch().columns()) {
        let replacement = if target_cols.contains(field.name()) {
            encoded(field.name())
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

/// Groups infrequent categories (those whose relative frequency in the training data
/// is below the tolerance) into the single bucket label [`RARE_LABEL`].
///
/// Labels never seen during fit, and missing values, are also mapped to the bucket
/// label at transform time, so downstream encoders only ever see the retained
/// vocabulary plus [`RARE_LABEL`].
pub struct RareLabelEncoder {
    columns: Vec<String>,
    tolerance: f64,
    frequent_labels: Option<HashMap<String, HashSet<String>>>,
}

impl RareLabelEncoder {
    /// Create a new rare label encoder with the default tolerance of [`DEFAULT_TOLERANCE`].
    pub fn new(columns: impl Into<Columns>) -> Self {
        Self::with_tolerance(columns, DEFAULT_TOLERANCE)
    }

    /// Create a new rare label encoder with an explicit frequency tolerance.
    pub fn with_tolerance(columns: impl Into<Columns>, tolerance: f64) -> Self {
        Self {
            columns: columns.into().into_vec(),
            tolerance,
            frequent_labels: None,
        }
    }

    /// For each target column, compute the relative frequency of every label over the
    /// training rows (missing values count toward the row total but form no label) and
    /// retain the labels whose frequency is at or above the tolerance.
    pub fn fit(
        &mut self,
        dataset: &Dataset,
        _target: Option<&Float64Array>,
    ) -> FeaturePrepResult<()> {
        if !(0.0..=1.0).contains(&self.tolerance) {
            return Err(FeaturePrepError::InvalidParameter(format!(
                "Tolerance {} must be between 0 and 1",
                self.tolerance
            )));
        }
        validate_columns(dataset, &self.columns)?;
        if dataset.num_rows() == 0 {
            return Err(FeaturePrepError::InvalidParameter(
                "Label frequencies cannot be learned from a dataset with no rows".to_string(),
            ));
        }
        let total = dataset.num_rows() as f64;
        let mut frequent_labels = HashMap::new();
        for col_name in &self.columns {
            let array = dataset.str_column(col_name)?;
            let mut counts: HashMap<&str, usize> = HashMap::new();
            for label in array.iter().flatten() {
                *counts.entry(label).or_insert(0) += 1;
            }
            let frequent: HashSet<String> = counts
                .into_iter()
                .filter(|(_, count)| *count as f64 / total >= self.tolerance)
                .map(|(label, _)| label.to_string())
                .collect();
            debug!(
                "column '{}' retains {} frequent labels at tolerance {}",
                col_name,
                frequent.len(),
                self.tolerance
            );
            frequent_labels.insert(col_name.clone(), frequent);
        }
        self.frequent_labels = Some(frequent_labels);
        Ok(())
    }

    /// Returns a new dataset where, for each target column, values outside the retained
    /// label set are replaced with the bucket label. Missing values and labels never
    /// observed during fit are always grouped as rare.
    pub fn transform(&self, dataset: &Dataset) -> FeaturePrepResult<Dataset> {
        let frequent_labels = self
            .frequent_labels
            .as_ref()
            .ok_or(FeaturePrepError::FitNotCalled)?;
        validate_columns(dataset, &self.columns)?;
        let mut encoded_columns: HashMap<String, ArrayRef> = HashMap::new();
        for col_name in &self.columns {
            if let Some(frequent) = frequent_labels.get(col_name) {
                let array = dataset.str_column(col_name)?;
                let encoded: StringArray = array
                    .iter()
                    .map(|value| match value {
                        Some(label) if frequent.contains(label) => Some(label),
                        _ => Some(RARE_LABEL),
                    })
                    .collect();
                encoded_columns.insert(col_name.clone(), Arc::new(encoded) as ArrayRef);
            }
        }
        apply_encoding(dataset, &self.columns, |name| {
            encoded_columns.get(name).cloned()
        })
    }

    fn inherent_is_stateful(&self) -> bool {
        true
    }
}

/// Replaces category labels with 0-based integer ranks ordered by the mean of the
/// target variable for each label, smallest mean first.
///
/// The encoding is strict: at transform time every value must have a learned rank, and
/// a label that was never observed during fit (or a missing value) fails the whole
/// transform with `FeaturePrepError::EncodingGap` instead of being given a fallback.
pub struct TargetMeanEncoder {
    columns: Vec<String>,
    rank_mappings: Option<HashMap<String, HashMap<String, i64>>>,
}

impl TargetMeanEncoder {
    /// Create a new target mean encoder for the given column or columns.
    pub fn new(columns: impl Into<Columns>) -> Self {
        Self {
            columns: columns.into().into_vec(),
            rank_mappings: None,
        }
    }

    /// For each target column, group the training rows by label, compute the mean of
    /// the target variable per label, and assign ranks 0, 1, 2, ... in order of
    /// ascending mean. Labels with equal means are ranked in lexical order.
    pub fn fit(
        &mut self,
        dataset: &Dataset,
        target: Option<&Float64Array>,
    ) -> FeaturePrepResult<()> {
        let target = target.ok_or_else(|| {
            FeaturePrepError::InvalidParameter(
                "TargetMeanEncoder requires a target variable to fit".to_string(),
            )
        })?;
        if target.len() != dataset.num_rows() {
            return Err(FeaturePrepError::InvalidParameter(format!(
                "Target length {} does not match dataset row count {}",
                target.len(),
                dataset.num_rows()
            )));
        }
        if target.null_count() > 0 {
            return Err(FeaturePrepError::InvalidParameter(
                "Target variable must not contain missing values".to_string(),
            ));
        }
        validate_columns(dataset, &self.columns)?;
        if dataset.num_rows() == 0 {
            return Err(FeaturePrepError::InvalidParameter(
                "Label ranks cannot be learned from a dataset with no rows".to_string(),
            ));
        }
        let mut rank_mappings = HashMap::new();
        for col_name in &self.columns {
            let array = dataset.str_column(col_name)?;
            let mut sums: HashMap<&str, (f64, usize)> = HashMap::new();
            for (row, value) in array.iter().enumerate() {
                if let Some(label) = value {
                    let entry = sums.entry(label).or_insert((0.0, 0));
                    entry.0 += target.value(row);
                    entry.1 += 1;
                }
            }
            let mut means: Vec<(&str, f64)> = sums
                .into_iter()
                .map(|(label, (sum, count))| (label, sum / count as f64))
                .collect();
            means.sort_by(|(label_a, mean_a), (label_b, mean_b)| {
                mean_a.total_cmp(mean_b).then_with(|| label_a.cmp(label_b))
            });
            let mapping: HashMap<String, i64> = means
                .into_iter()
                .enumerate()
                .map(|(rank, (label, _))| (label.to_string(), rank as i64))
                .collect();
            debug!(
                "column '{}' learned ranks for {} labels",
                col_name,
                mapping.len()
            );
            rank_mappings.insert(col_name.clone(), mapping);
        }
        self.rank_mappings = Some(rank_mappings);
        Ok(())
    }

    /// Returns a new dataset where, for each target column, every label is replaced with
    /// its learned rank. If any value has no learned rank, the transform fails with
    /// `FeaturePrepError::EncodingGap` naming every affected column, and no partially
    /// encoded dataset is produced.
    pub fn transform(&self, dataset: &Dataset) -> FeaturePrepResult<Dataset> {
        let rank_mappings = self
            .rank_mappings
            .as_ref()
            .ok_or(FeaturePrepError::FitNotCalled)?;
        validate_columns(dataset, &self.columns)?;
        let mut gap_columns = Vec::new();
        let mut encoded_columns: HashMap<String, ArrayRef> = HashMap::new();
        for col_name in &self.columns {
            if let Some(mapping) = rank_mappings.get(col_name) {
                let array = dataset.str_column(col_name)?;
                let encoded: Int64Array = array
                    .iter()
                    .map(|value| value.and_then(|label| mapping.get(label).copied()))
                    .collect();
                // A null in the encoded output marks a value without a learned rank.
                if encoded.null_count() > 0 {
                    gap_columns.push(col_name.clone());
                }
                encoded_columns.insert(col_name.clone(), Arc::new(encoded) as ArrayRef);
            }
        }
        if !gap_columns.is_empty() {
            return Err(FeaturePrepError::EncodingGap {
                columns: gap_columns,
            });
        }
        apply_encoding(dataset, &self.columns, |name| {
            encoded_columns.get(name).cloned()
        })
    }

    fn inherent_is_stateful(&self) -> bool {
        true
    }
}

// Implement the Transformer trait for the encoders in this module.
impl_transformer!(RareLabelEncoder);
impl_transformer!(TargetMeanEncoder);
