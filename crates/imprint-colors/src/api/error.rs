//! Unified error type for the imprint-colors public API.

use thiserror::Error;

use crate::palette::{PaletteError, ParseColorError};

/// Unified error type for the imprint-colors public API.
///
/// # Example
///
/// ```
/// use imprint_colors::{ColorBook, ReduceError};
///
/// fn load_book() -> Result<ColorBook, ReduceError> {
///     let book = ColorBook::from_hex(&[("#000000", "Black"), ("#FFFFFF", "White")])?;
///     Ok(book)
/// }
/// # assert!(load_book().is_ok());
/// ```
#[derive(Debug, Error)]
pub enum ReduceError {
    /// Color book validation error
    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),

    /// Invalid hex color
    #[error("color parse error: {0}")]
    ParseColor(#[from] ParseColorError),

    /// The image has no pixels
    #[error("image has no pixels")]
    EmptyImage,
}
