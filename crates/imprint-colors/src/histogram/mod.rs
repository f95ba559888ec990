//! Color histograms over RGBA images
//!
//! [`histogram`] counts pixels per color. Fully transparent pixels are
//! counted as a single transparent color (key `"0"`) whatever their RGB.
//! Entries come back ordered by descending count, ties by ascending color,
//! so index 0 is always the most frequent color.
//!
//! [`quantize`] reduces an image to a color budget in place (median cut, no
//! dithering) and [`tiles`] splits an image into a grid of sub-images.

mod quantize;
mod tiles;

use std::collections::HashMap;

use image::RgbaImage;

use crate::color::Argb;

pub use quantize::quantize;
pub use tiles::tiles;

/// The color every fully transparent pixel is counted as.
pub const TRANSPARENT_PIXEL: Argb = Argb::new(0, 0, 0, 0);

/// One histogram bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistogramEntry {
    /// Bucket color
    pub color: Argb,
    /// Pixels of that color
    pub count: u32,
}

impl HistogramEntry {
    /// Create an entry.
    #[inline]
    pub fn new(color: Argb, count: u32) -> Self {
        Self { color, count }
    }
}

/// Normalize a pixel for counting: any zero-alpha pixel becomes
/// [`TRANSPARENT_PIXEL`].
#[inline]
pub(crate) fn pixel_color(px: [u8; 4]) -> Argb {
    if px[3] == 0 {
        TRANSPARENT_PIXEL
    } else {
        Argb::from_rgba(px)
    }
}

fn count_colors(image: &RgbaImage) -> HashMap<Argb, u32> {
    let mut counts: HashMap<Argb, u32> = HashMap::new();
    for px in image.pixels() {
        *counts.entry(pixel_color(px.0)).or_insert(0) += 1;
    }
    counts
}

/// Count pixels per color, most frequent first.
pub fn histogram(image: &RgbaImage) -> Vec<HistogramEntry> {
    let mut entries: Vec<HistogramEntry> = count_colors(image)
        .into_iter()
        .map(|(color, count)| HistogramEntry::new(color, count))
        .collect();
    sort_by_count(&mut entries);
    entries
}

/// Sort entries by descending count, ties by ascending color.
pub fn sort_by_count(entries: &mut [HistogramEntry]) {
    entries.sort_by(|a, b| b.count.cmp(&a.count).then(a.color.cmp(&b.color)));
}

/// Number of distinct colors in an image.
pub fn count_distinct_colors(image: &RgbaImage) -> usize {
    count_colors(image).len()
}

/// Sum of all entry counts.
pub fn total_pixels(entries: &[HistogramEntry]) -> u64 {
    entries.iter().map(|e| e.count as u64).sum()
}
