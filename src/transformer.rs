//! ## Transformer Contract
//!
//! This module provides the core abstraction shared by every feature engineering
//! step in the Feature Prep library.
//!
//! ### Overview
//!
//! - The [`Transformer`] trait defines a common interface for implementing data
//!   transformation steps, supporting both stateful (requiring fitting) and
//!   stateless transformations.
//! - The [`crate::impl_transformer`] macro implements the trait for a type from
//!   its inherent methods, so concrete transformers can also be used directly
//!   without going through the trait.
//!
//! A transformer holds no references to the data it was fitted on: `fit` copies
//! whatever it needs into the transformer's own state. Fitting requires `&mut
//! self`, so a transformer cannot be fitted and applied concurrently, while any
//! number of `transform` calls may run in parallel on a fitted transformer.

use arrow::array::Float64Array;

use crate::dataset::Dataset;
use crate::exceptions::FeaturePrepResult;

/// Trait for the feature engineering steps of a preprocessing chain.
///
/// Every transformer must provide a `fit` method (which may compute parameters from
/// the training data) and a `transform` method (which builds a new dataset with the
/// transformation applied).
pub trait Transformer {
    /// Fit the transformer on a training dataset.
    ///
    /// # Arguments
    ///
    /// * `dataset` - The training dataset.
    /// * `target` - The target variable aligned row-for-row with `dataset`. Only
    ///   target-aware transformers read it; all others ignore it.
    ///
    /// # Returns
    ///
    /// * `FeaturePrepResult<()>` - Returns Ok if successful, or an error otherwise.
    ///
    /// Calling `fit` again discards previously learned state and replaces it with
    /// state computed from the new training data.
    fn fit(&mut self, dataset: &Dataset, target: Option<&Float64Array>)
        -> FeaturePrepResult<()>;

    /// Transform the input dataset, returning a new dataset with the transformation applied.
    ///
    /// The input dataset is never modified. Stateful transformers fail with
    /// `FeaturePrepError::FitNotCalled` if they have not been fitted.
    fn transform(&self, dataset: &Dataset) -> FeaturePrepResult<Dataset>;

    /// Returns true if the transformer is stateful (i.e. requires a call to fit before
    /// transform can be called).
    fn is_stateful(&self) -> bool;
}

/// Macro to implement the [`Transformer`] trait for Feature Prep transformers.
///
/// The type must already have inherent methods:
/// - `fn fit(&mut self, &Dataset, Option<&Float64Array>) -> FeaturePrepResult<()>`
/// - `fn transform(&self, &Dataset) -> FeaturePrepResult<Dataset>`
/// - **`fn inherent_is_stateful(&self) -> bool`**
///
/// # Example
///
/// ```rust,no_run
/// use arrow::array::Float64Array;
/// use feature_prep::dataset::Dataset;
/// use feature_prep::exceptions::FeaturePrepResult;
/// // Import the macro.
/// use feature_prep::impl_transformer;
///
/// // Suppose you have a transformer type `MyTransformer` defined elsewhere:
/// pub struct MyTransformer { /* ... */ }
///
/// impl MyTransformer {
///     pub fn fit(
///         &mut self,
///         dataset: &Dataset,
///         target: Option<&Float64Array>,
///     ) -> FeaturePrepResult<()> {
///         // Implementation here...
///         Ok(())
///     }
///
///     pub fn transform(&self, dataset: &Dataset) -> FeaturePrepResult<Dataset> {
///         // Implementation here...
///         Ok(dataset.clone())
///     }
///
///     // Note the different name for the inherent method.
///     pub fn inherent_is_stateful(&self) -> bool {
///         true // or false
///     }
/// }
///
/// // Then simply invoke the macro to implement the Transformer trait:
/// impl_transformer!(MyTransformer);
/// ```
#[macro_export]
macro_rules! impl_transformer {
    ($ty:ty) => {
        impl $crate::transformer::Transformer for $ty {
            fn fit(
                &mut self,
                dataset: &$crate::dataset::Dataset,
                target: Option<&arrow::array::Float64Array>,
            ) -> $crate::exceptions::FeaturePrepResult<()> {
                <$ty>::fit(self, dataset, target)
            }
            fn transform(
                &self,
                dataset: &$crate::dataset::Dataset,
            ) -> $crate::exceptions::FeaturePrepResult<$crate::dataset::Dataset> {
                <$ty>::transform(self, dataset)
            }
            fn is_stateful(&self) -> bool {
                <$ty>::inherent_is_stateful(self)
            }
        }
    };
}
