//! Color book (target print palette) and nearest-color matching.

mod color_book;
mod error;

pub use color_book::{closest_color, BookColor, ColorBook, LAVENDER_COLORS};
pub use error::{PaletteError, ParseColorError};
