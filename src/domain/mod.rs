//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - the four typed configuration sections (`DatasetPaths`, `SplitRatios`,
//!   `FeatureSpec`, `ModelHyperparams`)
//! - column roles (`Role`)
//! - the immutable, validated `Config`

pub mod types;

pub use types::*;
