#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Proportional symbol core.
//!
//! Derives the scalable attribute list of a `GeoJSON` point dataset,
//! computes the global scaling baseline, turns attribute values into
//! circle radii with Flannery's perceptual scaling, and keeps every
//! rendered marker in sync as the selected attribute moves through the
//! sequence.

pub mod attributes;
pub mod layer;
pub mod popup;
pub mod render;
pub mod scale;
pub mod sequence;
pub mod value;

use thiserror::Error;

/// Errors raised while deriving symbols from a dataset.
#[derive(Debug, Error)]
pub enum SymbolError {
    /// No feature carried a numeric value for any attribute.
    #[error("Dataset has no numeric attribute values to scale")]
    NoValues,

    /// The smallest value in the dataset cannot be used as a divisor.
    #[error("Scale baseline must be positive, found {value}")]
    NonPositiveBaseline {
        /// The offending minimum.
        value: f64,
    },
}
