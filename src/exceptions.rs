//! ## Custom Errors for Feature Prep
//!
//! This module defines custom error types for the Feature Prep library.
//! It uses the `thiserror` crate to derive the `Error` trait for custom error types.
//! The `FeaturePrepError` enum includes variants representing different error scenarios
//! encountered throughout the library, making error handling straightforward and clear.
//!
//! The `FeaturePrepResult` type alias simplifies error handling by providing a convenient
//! alias for results returned by the library.
//!
//! ### Example
//!
//! ```rust
//! use feature_prep::exceptions::{FeaturePrepError, FeaturePrepResult};
//!
//! fn check_tolerance(tolerance: f64) -> FeaturePrepResult<()> {
//!     if !(0.0..=1.0).contains(&tolerance) {
//!         return Err(FeaturePrepError::InvalidParameter(format!(
//!             "Tolerance {} must be between 0 and 1",
//!             tolerance
//!         )));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Errors specific to the Feature Prep library.
#[derive(Debug, Error)]
pub enum FeaturePrepError {
    /// Wraps errors from Arrow.
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Indicates that an invalid parameter was provided (e.g., unsupported value or incorrect data type).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Indicates that the specified column does not exist in the dataset.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Indicates the transform method was called before calling fit for a stateful transformer.
    #[error("Transform called before fit for stateful transformer")]
    FitNotCalled,

    /// Indicates that a value had no learned encoding during a categorical transform.
    /// The named columns contain at least one label (or missing value) that was never
    /// observed when the encoder was fitted.
    #[error("No learned encoding for values in columns: {}", .columns.join(", "))]
    EncodingGap { columns: Vec<String> },

    /// Indicates that a column contains values outside the mathematical domain of a
    /// transform (e.g. non-positive values passed to a log transform).
    #[error("Values outside the transform domain in columns: {}", .columns.join(", "))]
    InvalidDomain { columns: Vec<String> },
}

/// A convenient result type for Feature Prep operations.
pub type FeaturePrepResult<T> = std::result::Result<T, FeaturePrepError>;
