//! Replace or remove specific colors.

use image::RgbaImage;
use imprint_colors::color::check_color;
use imprint_colors::Argb;

/// Tolerance used by [`remove_colors`].
const REMOVE_TOLERANCE: i32 = 20;

#[inline]
fn within(value: u8, target: u8, tolerance: u8) -> bool {
    let low = target.saturating_sub(tolerance);
    let high = target.saturating_add(tolerance);
    (low..=high).contains(&value)
}

/// Replace every pixel whose RGB lies within `tolerance` of `old` on each
/// channel with the RGB of `new`.
///
/// Alpha is kept, unless `new` is transparent, in which case matching pixels
/// become fully transparent. Returns the new image and whether any pixel was
/// replaced.
pub fn replace_color(image: &RgbaImage, old: Argb, new: Argb, tolerance: u8) -> (RgbaImage, bool) {
    let mut out = image.clone();
    let to_transparent = new.is_transparent();
    let mut replaced = 0usize;

    for px in out.pixels_mut() {
        let [r, g, b, _] = px.0;
        if within(r, old.r, tolerance) && within(g, old.g, tolerance) && within(b, old.b, tolerance) {
            px.0[0] = new.r;
            px.0[1] = new.g;
            px.0[2] = new.b;
            if to_transparent {
                px.0[3] = 0;
            }
            replaced += 1;
        }
    }

    tracing::debug!(old = %old, new = %new, tolerance, replaced, "colors replaced");
    (out, replaced > 0)
}

/// Make every pixel close to one of `colors` transparent.
pub fn remove_colors(image: &RgbaImage, colors: &[Argb]) -> RgbaImage {
    let mut out = image.clone();
    for px in out.pixels_mut() {
        if check_color(Argb::from_rgba(px.0), colors, REMOVE_TOLERANCE) {
            px.0[3] = 0;
        }
    }
    out
}
