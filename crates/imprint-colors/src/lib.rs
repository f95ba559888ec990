//! imprint-colors: color reduction for imprint artwork
//!
//! Turns an arbitrary logo or artwork raster into a short, deduplicated list
//! of print colors taken from a color book.
//!
//! # Quick Start
//!
//! ```
//! use image::{Rgba, RgbaImage};
//! use imprint_colors::{detect_background, ColorBook, ColorReducer};
//!
//! let book = ColorBook::from_hex(&[
//!     ("#FFFFFF", "White"),
//!     ("#C8102E", "Red"),
//!     ("#003DA5", "Blue"),
//! ])
//! .unwrap();
//!
//! // red square on white
//! let mut image = RgbaImage::from_pixel(32, 32, Rgba([255, 255, 255, 255]));
//! for y in 8..24 {
//!     for x in 8..24 {
//!         image.put_pixel(x, y, Rgba([200, 16, 46, 255]));
//!     }
//! }
//!
//! let background = detect_background(&image, 1, None).map(|hint| hint.to_detail());
//! let output = ColorReducer::new(book)
//!     .tile_count(1)
//!     .reduce(&image, background.as_ref())
//!     .unwrap();
//!
//! assert_eq!(output.details.len(), 1);
//! assert_eq!(output.details[0].mapped_name(), "ffc8102e");
//! ```
//!
//! # Pipeline
//!
//! ```text
//! image
//!   |
//!   v
//! quantize (median cut, 24 colors)  -->  histogram (count desc)
//!   |
//!   +--> whole-image strategy               +--> tiled strategy
//!   |      remove background                |      remove background per tile
//!   |      drop entries < 0.1 %             |      whole-image + tile winners
//!   |      std-dev filter                   |      all selected colors pass
//!   |                                       |
//!   +---------------+-----------------------+
//!                   v
//!            generate_metrics  (Delta-E, RGB, hue neighbor lists)
//!                   |
//!                   v
//!            resolve_collapses -> apply_collapses
//!                   |
//!                   v
//!            map_colors  (color book, uuid groups)
//! ```
//!
//! Images with 1000 or more distinct colors always use the whole-image
//! strategy.
//!
//! # Color keys
//!
//! Colors are identified by [`Argb::name()`]: lowercase `aarrggbb`, with
//! every fully transparent color keyed `"0"`. Business rules (the pure
//! black/white special cases, the lavender re-rank in [`closest_color`])
//! compare these keys.
//!
//! # Two Lab conversions
//!
//! [`color::rgb_to_lab`] (D50, integer output) backs
//! [`color::color_difference`]. [`color::delta_e`] uses a separate D65
//! conversion and drives every merge decision. The two give different
//! numbers for the same pair and are not interchangeable.

pub mod api;
pub mod background;
pub mod color;
pub mod histogram;
pub mod palette;
pub mod reduce;


pub use api::{ColorReducer, ReduceError, ReductionOutput};
pub use background::{detect_background, remove_most_likely_bg, BackgroundHint};
pub use color::Argb;
pub use palette::{closest_color, BookColor, ColorBook, PaletteError, ParseColorError};
pub use reduce::{ArgbColor, ColorDetail, Cuts, IdSource, RandomIds, SequentialIds, Thresholds};
