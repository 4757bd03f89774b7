//! # Feature Prep
//!
//! Feature Prep is a library of fit/transform feature engineering transformers for
//! tabular data backed by Apache Arrow. It covers the preprocessing stages of a
//! typical regression pipeline: imputing missing values, recoding temporal
//! variables, grouping rare category labels, target-based categorical encoding,
//! log transforms, scaling, and column selection.
//!
//! Every transformer follows the same two-phase contract:
//!
//! - `fit` learns any required state from a training [`dataset::Dataset`] (and an
//!   optional target vector) and stores it on the transformer.
//! - `transform` applies the learned state to a dataset and returns a new
//!   [`dataset::Dataset`], leaving the input untouched.
//!
//! Stateful transformers return [`exceptions::FeaturePrepError::FitNotCalled`] if
//! `transform` is called before `fit`. Calling `fit` again replaces the learned
//! state with values from the new training data.
//!
//! ### Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use arrow::array::{ArrayRef, Float64Array, StringArray};
//! use arrow::datatypes::{DataType, Field};
//! use feature_prep::dataset::Dataset;
//! use feature_prep::exceptions::FeaturePrepResult;
//! use feature_prep::transformers::imputation::{CategoricalImputer, NumericalImputer};
//!
//! fn main() -> FeaturePrepResult<()> {
//!     let dataset = Dataset::try_new(
//!         vec![
//!             Field::new("fence", DataType::Utf8, true),
//!             Field::new("lot_frontage", DataType::Float64, true),
//!         ],
//!         vec![
//!             Arc::new(StringArray::from(vec![Some("wood"), None, Some("wire")])) as ArrayRef,
//!             Arc::new(Float64Array::from(vec![Some(60.0), Some(60.0), None])) as ArrayRef,
//!         ],
//!     )?;
//!
//!     // Stateless: substitutes the sentinel label for missing values.
//!     let categorical = CategoricalImputer::new("fence");
//!     let dataset = categorical.transform(&dataset)?;
//!     assert_eq!(dataset.str_column("fence")?.value(1), "Missing");
//!
//!     // Stateful: learns the most frequent value, then fills with it.
//!     let mut numerical = NumericalImputer::new("lot_frontage");
//!     numerical.fit(&dataset, None)?;
//!     let dataset = numerical.transform(&dataset)?;
//!     assert_eq!(dataset.f64_column("lot_frontage")?.value(2), 60.0);
//!     Ok(())
//! }
//! ```
//!
//! ### Logging
//!
//! Debug-level logging of fitted state can be enabled by setting the
//! `DEBUG_FEATURE_PREP` environment variable (see the [`logging`] module).

pub mod dataset;
pub mod exceptions;
pub mod logging;
pub mod transformer;
pub mod transformers;
