//! Median cut color quantization.
//!
//! Boxes of colors are split along their widest channel at the median until
//! the color budget is reached; each box is represented by its
//! pixel-weighted mean. Pixels are then remapped to the nearest
//! representative without dithering. Transparent pixels never join a box.

use std::collections::HashMap;

use image::RgbaImage;
use rayon::prelude::*;

use super::{count_colors, pixel_color, TRANSPARENT_PIXEL};
use crate::color::Argb;

/// A box of colors in ARGB space.
#[derive(Clone)]
struct ColorBox {
    /// Colors with their pixel counts
    colors: Vec<(Argb, u32)>,
    /// Per-channel (min, max), in order a, r, g, b
    bounds: [(u8, u8); 4],
}

#[inline]
fn channel(c: Argb, idx: usize) -> u8 {
    match idx {
        0 => c.a,
        1 => c.r,
        2 => c.g,
        _ => c.b,
    }
}

impl ColorBox {
    fn new(colors: Vec<(Argb, u32)>) -> Self {
        let mut bounds = [(u8::MAX, u8::MIN); 4];
        for (color, _) in &colors {
            for (idx, bound) in bounds.iter_mut().enumerate() {
                let v = channel(*color, idx);
                bound.0 = bound.0.min(v);
                bound.1 = bound.1.max(v);
            }
        }
        Self { colors, bounds }
    }

    /// Widest channel index and its range.
    fn widest_channel(&self) -> (usize, u8) {
        let mut widest = (1, 0u8);
        // r, g, b first so opaque images never split on alpha
        for idx in [1, 2, 3, 0] {
            let (lo, hi) = self.bounds[idx];
            let range = hi.saturating_sub(lo);
            if range > widest.1 {
                widest = (idx, range);
            }
        }
        widest
    }

    fn split(&mut self) -> Option<ColorBox> {
        if self.colors.len() < 2 {
            return None;
        }
        let (idx, _) = self.widest_channel();
        self.colors.sort_by_key(|(c, _)| channel(*c, idx));

        let mid = self.colors.len() / 2;
        let right = self.colors.split_off(mid);
        *self = ColorBox::new(std::mem::take(&mut self.colors));
        Some(ColorBox::new(right))
    }

    fn average(&self) -> Argb {
        let mut sums = [0u64; 4];
        let mut total = 0u64;
        for (color, count) in &self.colors {
            let count = *count as u64;
            for (idx, sum) in sums.iter_mut().enumerate() {
                *sum += channel(*color, idx) as u64 * count;
            }
            total += count;
        }
        if total == 0 {
            return Argb::BLACK;
        }
        Argb::new(
            (sums[0] / total) as u8,
            (sums[1] / total) as u8,
            (sums[2] / total) as u8,
            (sums[3] / total) as u8,
        )
    }
}

fn squared_distance(a: Argb, b: Argb) -> u32 {
    (0..4)
        .map(|idx| {
            let d = channel(a, idx) as i32 - channel(b, idx) as i32;
            (d * d) as u32
        })
        .sum()
}

fn nearest(palette: &[Argb], color: Argb) -> Argb {
    let mut best = palette[0];
    let mut best_distance = u32::MAX;
    for &candidate in palette {
        let d = squared_distance(candidate, color);
        if d < best_distance {
            best_distance = d;
            best = candidate;
        }
    }
    best
}

/// Reduce `image` to at most `max_colors` visible colors, in place.
///
/// Fully transparent pixels are normalized to transparent black and are not
/// counted against the budget. An image already within budget keeps its
/// colors.
pub fn quantize(image: &mut RgbaImage, max_colors: usize) {
    if image.width() == 0 || image.height() == 0 {
        return;
    }
    let max_colors = max_colors.max(1);

    let mut visible: Vec<(Argb, u32)> = count_colors(image)
        .into_iter()
        .filter(|(c, _)| *c != TRANSPARENT_PIXEL)
        .collect();
    visible.sort();

    let mapping: HashMap<Argb, Argb> = if visible.len() <= max_colors {
        visible.iter().map(|(c, _)| (*c, *c)).collect()
    } else {
        let palette = median_cut(visible.clone(), max_colors);
        tracing::trace!(
            colors = visible.len(),
            palette = palette.len(),
            "median cut palette built"
        );
        visible
            .iter()
            .map(|(c, _)| (*c, nearest(&palette, *c)))
            .collect()
    };

    let width = image.width() as usize;
    image
        .par_chunks_mut(width * 4)
        .for_each(|row| {
            for px in row.chunks_exact_mut(4) {
                let color = pixel_color([px[0], px[1], px[2], px[3]]);
                let mapped = mapping.get(&color).copied().unwrap_or(color);
                px.copy_from_slice(&mapped.to_rgba());
            }
        });
}

fn median_cut(colors: Vec<(Argb, u32)>, max_colors: usize) -> Vec<Argb> {
    let mut boxes = vec![ColorBox::new(colors)];

    while boxes.len() < max_colors {
        let candidate = boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| b.colors.len() >= 2)
            .max_by(|(ia, a), (ib, b)| {
                a.widest_channel()
                    .1
                    .cmp(&b.widest_channel().1)
                    // earliest box wins ties
                    .then(ib.cmp(ia))
            })
            .map(|(i, _)| i);

        let Some(idx) = candidate else {
            break;
        };
        match boxes[idx].split() {
            Some(right) => boxes.push(right),
            None => break,
        }
    }

    boxes.iter().map(ColorBox::average).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::histogram::histogram;
    use image::Rgba;

    fn gradient(width: u32) -> RgbaImage {
        RgbaImage::from_fn(width, 1, |x, _| Rgba([(x * 255 / (width - 1)) as u8, 0, 0, 255]))
    }

    #[test]
    fn test_quantize_empty_image() {
        let mut img = RgbaImage::new(0, 3);
        quantize(&mut img, 24);
        assert_eq!(img.dimensions(), (0, 3));

        let mut img = RgbaImage::new(5, 0);
        quantize(&mut img, 24);
        assert_eq!(img.dimensions(), (5, 0));
    }

    #[test]
    fn test_quantize_respects_budget() {
        let mut img = gradient(64);
        quantize(&mut img, 8);
        assert!(histogram(&img).len() <= 8);
    }

    #[test]
    fn test_quantize_keeps_small_images() {
        let mut img = RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255]));
        img.put_pixel(0, 0, Rgba([200, 100, 50, 255]));
        let before = img.clone();
        quantize(&mut img, 24);
        assert_eq!(img, before);
    }

    #[test]
    fn test_quantize_normalizes_transparent() {
        let mut img = gradient(32);
        img.put_pixel(0, 0, Rgba([90, 90, 90, 0]));
        quantize(&mut img, 4);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 0]);
        let h = histogram(&img);
        assert!(h.iter().any(|e| e.color.name() == "0"));
        assert!(h.len() <= 5);
    }

    #[test]
    fn test_quantize_two_clusters() {
        let img_colors = [
            [250, 0, 0, 255],
            [245, 5, 0, 255],
            [0, 0, 250, 255],
            [0, 5, 245, 255],
        ];
        let mut img = RgbaImage::from_fn(4, 1, |x, _| Rgba(img_colors[x as usize]));
        quantize(&mut img, 2);
        let h = histogram(&img);
        assert_eq!(h.len(), 2);
        assert!(h.iter().all(|e| e.count == 2));
    }
}
