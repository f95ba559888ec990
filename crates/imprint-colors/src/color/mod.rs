//! Color types and color math
//!
//! - [`Argb`]: 8-bit ARGB value with a canonical string key
//! - [`Lab`] and [`rgb_to_lab`]: the two L*a*b* conversions (D65 and D50)
//! - distance metrics: [`rgb_distance`], [`delta_e`], [`full_compare`],
//!   [`color_difference`], [`hue_distance`], [`check_color`]
//! - [`nearest_named_color`] over the static [`NAMED_COLORS`] table
//!
//! # Example
//!
//! ```
//! use imprint_colors::color::{delta_e, rgb_distance, Argb};
//!
//! let red: Argb = "#FF0000".parse().unwrap();
//! let dark_red: Argb = "#E00000".parse().unwrap();
//!
//! assert_eq!(rgb_distance(red, dark_red), 31);
//! assert!(delta_e(red, dark_red) < 15.0);
//! ```

mod argb;
mod distance;
mod lab;
mod named;

pub use argb::Argb;
pub use distance::{check_color, color_difference, delta_e, full_compare, hue_distance, rgb_distance};
pub use lab::{rgb_to_lab, Lab};
pub use named::{named_color, nearest_named_color, NamedColor, NAMED_COLORS};
