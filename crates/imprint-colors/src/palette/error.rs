//! Error types for color parsing and color book validation.

use thiserror::Error;

/// Error returned when a hex color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    /// Hex digits count is not 3, 6 or 8
    #[error("invalid hex color length {0} (expected 3, 6 or 8 digits)")]
    InvalidLength(usize),

    /// A character other than an ASCII hex digit
    #[error("invalid hex digits in {0:?}")]
    InvalidHex(String),
}

/// Error returned when a color book is invalid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    /// No colors provided
    #[error("color book cannot be empty")]
    EmptyBook,

    /// The same color appears twice
    #[error("duplicate color {color} at index {index}")]
    DuplicateColor {
        /// Index of the second occurrence
        index: usize,
        /// The duplicated color key
        color: String,
    },

    /// A hex entry could not be parsed
    #[error("invalid color: {0}")]
    ParseColor(#[from] ParseColorError),
}
