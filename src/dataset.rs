//! ## Dataset and Column Selection Types
//!
//! This module defines the in-memory data model shared by all transformers.
//!
//! - [`Dataset`] is an immutable, ordered table of named columns backed by an Arrow
//!   [`RecordBatch`]. Categorical columns are `Utf8`, numeric columns are `Float64`
//!   or `Int64`, and missing values are Arrow nulls. Transformers never modify a
//!   dataset in place; they produce a new one.
//! - [`Columns`] normalizes the column selection accepted by transformer
//!   constructors, so that a single column name and a list of names can be passed
//!   interchangeably.
//!
//! Errors are returned as `FeaturePrepError` and results are wrapped in `FeaturePrepResult`.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;

use crate::exceptions::{FeaturePrepError, FeaturePrepResult};

/// Validates that every column in `target_cols` exists in the dataset.
/// Returns an error if any target column is missing.
pub fn validate_columns(dataset: &Dataset, target_cols: &[String]) -> FeaturePrepResult<()> {
    for col_name in target_cols {
        dataset.column(col_name)?;
    }
    Ok(())
}

/// An ordered, immutable table of named columns backed by Arrow arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    batch: RecordBatch,
}

impl Dataset {
    /// Builds a dataset from parallel lists of fields and arrays.
    /// Fails if the arrays have mismatched lengths or do not match the fields.
    pub fn try_new(fields: Vec<Field>, columns: Vec<ArrayRef>) -> FeaturePrepResult<Self> {
        let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?;
        Ok(Self { batch })
    }

    /// Returns the schema of the dataset.
    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    /// Returns the underlying record batch.
    pub fn record_batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// Returns the number of rows in the dataset.
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    /// Returns the number of columns in the dataset.
    pub fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    /// Returns the column names in schema order.
    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|field| field.name().clone())
            .collect()
    }

    /// Returns the column with the given name.
    pub fn column(&self, name: &str) -> FeaturePrepResult<&ArrayRef> {
        self.batch.column_by_name(name).ok_or_else(|| {
            FeaturePrepError::MissingColumn(format!("Column '{}' not found in dataset", name))
        })
    }

    /// Returns the column with the given name as a string array.
    /// Fails if the column is not of Arrow's `Utf8` type.
    pub fn str_column(&self, name: &str) -> FeaturePrepResult<&StringArray> {
        let column = self.column(name)?;
        column.as_any().downcast_ref::<StringArray>().ok_or_else(|| {
            FeaturePrepError::InvalidParameter(format!(
                "Column '{}' must be Utf8, but found {:?}",
                name,
                column.data_type()
            ))
        })
    }

    /// Returns the column with the given name as a 64-bit float array.
    /// Fails if the column is not of Arrow's `Float64` type.
    pub fn f64_column(&self, name: &str) -> FeaturePrepResult<&Float64Array> {
        let column = self.column(name)?;
        column
            .as_any()
            .downcast_ref::<Float64Array>()
            .ok_or_else(|| {
                FeaturePrepError::InvalidParameter(format!(
                    "Column '{}' must be Float64, but found {:?}",
                    name,
                    column.data_type()
                ))
            })
    }

    /// Returns the column with the given name as a 64-bit integer array.
    /// Fails if the column is not of Arrow's `Int64` type.
    pub fn i64_column(&self, name: &str) -> FeaturePrepResult<&Int64Array> {
        let column = self.column(name)?;
        column.as_any().downcast_ref::<Int64Array>().ok_or_else(|| {
            FeaturePrepError::InvalidParameter(format!(
                "Column '{}' must be Int64, but found {:?}",
                name,
                column.data_type()
            ))
        })
    }

    /// Returns a new dataset with the named column replaced by the given array.
    /// The replacement may change the column's data type; it keeps its position.
    pub fn with_column(&self, name: &str, column: ArrayRef) -> FeaturePrepResult<Self> {
        let schema = self.batch.schema();
        let index = schema.index_of(name).map_err(|_| {
            FeaturePrepError::MissingColumn(format!("Column '{}' not found in dataset", name))
        })?;
        let mut fields: Vec<Field> = schema
            .fields()
            .iter()
            .map(|field| field.as_ref().clone())
            .collect();
        fields[index] = Field::new(name, column.data_type().clone(), true);
        let mut columns = self.batch.columns().to_vec();
        columns[index] = column;
        Self::try_new(fields, columns)
    }
}

impl From<RecordBatch> for Dataset {
    fn from(batch: RecordBatch) -> Self {
        Self { batch }
    }
}

/// An ordered list of column names for a transformer to operate on.
///
/// Transformer constructors take `impl Into<Columns>`, so a single name and a
/// list of names can be passed interchangeably:
///
/// ```rust
/// use feature_prep::dataset::Columns;
///
/// let single = Columns::from("alley");
/// let many = Columns::from(vec!["alley", "fence"]);
/// assert_eq!(single.as_slice(), ["alley"]);
/// assert_eq!(many.as_slice(), ["alley", "fence"]);
/// ```
#[derive(Debug, Clone)]
pub struct Columns(Vec<String>);

impl Columns {
    /// Returns the column names as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Consumes the selection and returns the column names.
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<&str> for Columns {
    fn from(name: &str) -> Self {
        Self(vec![name.to_string()])
    }
}

impl From<String> for Columns {
    fn from(name: String) -> Self {
        Self(vec![name])
    }
}

impl From<Vec<String>> for Columns {
    fn from(names: Vec<String>) -> Self {
        Self(names)
    }
}

impl From<Vec<&str>> for Columns {
    fn from(names: Vec<&str>) -> Self {
        Self(names.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Columns {
    fn from(names: &[&str]) -> Self {
        Self(names.iter().map(|name| name.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Columns {
    fn from(names: [&str; N]) -> Self {
        Self(names.iter().map(|name| name.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::DataType;

    fn sample_dataset() -> Dataset {
        Dataset::try_new(
            vec![
                Field::new("street", DataType::Utf8, true),
                Field::new("lot_area", DataType::Float64, true),
            ],
            vec![
                Arc::new(StringArray::from(vec![Some("paved"), None])) as ArrayRef,
                Arc::new(Float64Array::from(vec![Some(8450.0), Some(9600.0)])) as ArrayRef,
            ],
        )
        .expect("failed to build test dataset")
    }

    #[test]
    fn test_column_access() {
        let dataset = sample_dataset();
        assert_eq!(dataset.num_rows(), 2);
        assert_eq!(dataset.num_columns(), 2);
        assert_eq!(dataset.column_names(), vec!["street", "lot_area"]);
        assert_eq!(dataset.str_column("street").unwrap().value(0), "paved");
        assert_eq!(dataset.f64_column("lot_area").unwrap().value(1), 9600.0);
    }

    #[test]
    fn test_missing_column_error() {
        let dataset = sample_dataset();
        let err = dataset.column("nonexistent").unwrap_err();
        assert!(matches!(err, FeaturePrepError::MissingColumn(_)));
    }

    #[test]
    fn test_wrong_type_error() {
        let dataset = sample_dataset();
        let err = dataset.f64_column("street").unwrap_err();
        assert!(matches!(err, FeaturePrepError::InvalidParameter(_)));
        let err = dataset.str_column("lot_area").unwrap_err();
        assert!(matches!(err, FeaturePrepError::InvalidParameter(_)));
    }

    #[test]
    fn test_with_column_replaces_values_and_type() {
        let dataset = sample_dataset();
        let replacement: ArrayRef = Arc::new(Int64Array::from(vec![Some(1), Some(2)]));
        let updated = dataset.with_column("lot_area", replacement).unwrap();
        assert_eq!(updated.i64_column("lot_area").unwrap().value(0), 1);
        assert_eq!(updated.column_names(), vec!["street", "lot_area"]);
        // The input dataset is unchanged.
        assert_eq!(dataset.f64_column("lot_area").unwrap().value(0), 8450.0);
    }

    #[test]
    fn test_with_column_rejects_length_mismatch() {
        let dataset = sample_dataset();
        let replacement: ArrayRef = Arc::new(Int64Array::from(vec![Some(1)]));
        assert!(dataset.with_column("lot_area", replacement).is_err());
    }

    #[test]
    fn test_columns_normalization() {
        assert_eq!(Columns::from("alley").as_slice(), ["alley"]);
        assert_eq!(Columns::from("alley".to_string()).as_slice(), ["alley"]);
        assert_eq!(Columns::from(vec!["a", "b"]).as_slice(), ["a", "b"]);
        assert_eq!(
            Columns::from(vec!["a".to_string(), "b".to_string()]).as_slice(),
            ["a", "b"]
        );
        assert_eq!(Columns::from(["a", "b"]).as_slice(), ["a", "b"]);
        assert_eq!(
            Columns::from(vec!["a", "b"]).into_vec(),
            vec!["a".to_string(), "b".to_string()]
        );
    }
}
