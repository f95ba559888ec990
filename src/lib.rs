//! Imprint - artwork color reduction and decoration effects
//!
//! The color engine lives in the `imprint-colors` crate; this library wires
//! it to configuration, image I/O, asset download and the effect
//! generators, and is exposed for integration testing.

pub mod codec;
pub mod effects;
pub mod error;
pub mod models;
pub mod services;
