//! Single-color rendition of artwork.

use super::flood;
use image::RgbaImage;
use imprint_colors::Argb;

/// Recolor every pixel to `color`, keeping alpha.
///
/// With `remove_bg`, the region 4-connected to the top-left pixel and of
/// exactly its color is made transparent first.
pub fn one_color(image: &RgbaImage, color: Argb, remove_bg: bool) -> RgbaImage {
    let mut out = image.clone();
    let (width, height) = out.dimensions();
    if width == 0 || height == 0 {
        return out;
    }

    if remove_bg {
        let seed = *image.get_pixel(0, 0);
        let region = flood(width, height, &[(0, 0)], |x, y| *image.get_pixel(x, y) == seed);
        for (idx, px) in out.pixels_mut().enumerate() {
            if region[idx] {
                px.0[3] = 0;
            }
        }
        tracing::debug!(
            removed = region.iter().filter(|v| **v).count(),
            "one-color background cleared"
        );
    }

    for px in out.pixels_mut() {
        px.0[0] = color.r;
        px.0[1] = color.g;
        px.0[2] = color.b;
    }
    out
}
