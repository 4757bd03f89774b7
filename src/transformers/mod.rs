//! # Transformer Implementations
//!
//! The submodules contain the transformer implementations for different feature engineering tasks.

pub mod categorical_encoding;
pub mod feature_selection;
pub mod imputation;
pub mod numerical;
pub mod scaling;
pub mod temporal;
