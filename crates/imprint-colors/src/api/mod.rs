//! Public API for the imprint-colors crate.
//!
//! This module provides the high-level API: the [`ColorReducer`] builder,
//! its [`ReductionOutput`] and the [`ReduceError`] error type.

mod builder;
mod error;

pub use builder::{ColorReducer, ReductionOutput, DEFAULT_QUANTIZE_COLORS, DEFAULT_TILE_COUNT, LARGE_IMAGE_COLORS};
pub use error::ReduceError;
