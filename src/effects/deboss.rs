//! Emboss-style debossing preview.

use super::luma;
use image::{Rgba, RgbaImage};
use std::f64::consts::PI;

/// Kernel radius for artwork
const RADIUS: i32 = 5;
/// Kernel radius for text
const TEXT_RADIUS: i32 = 2;
/// Gaussian sigma of the kernel weights
const SIGMA: f64 = 1.5;

/// Anti-diagonal emboss kernel of size `(2r+1)²`, row-major.
///
/// Only cells with `u == -v` carry weight. A weight is negative when either
/// offset is negative.
fn emboss_kernel(radius: i32, sigma: f64) -> Vec<f64> {
    let size = (2 * radius + 1) as usize;
    let mut kernel = vec![0.0; size * size];
    let norm = 2.0 * PI * sigma * sigma;
    for v in -radius..=radius {
        let u = -v;
        let sign = if u < 0 || v < 0 { -8.0 } else { 8.0 };
        let weight = sign * (-((u * u + v * v) as f64) / (2.0 * sigma * sigma)).exp() / norm;
        let row = (v + radius) as usize;
        let col = (u + radius) as usize;
        kernel[row * size + col] = weight;
    }
    kernel
}

/// Deboss preview: gray emboss of the luma, auto-leveled, source alpha kept.
pub fn deboss(image: &RgbaImage, is_text: bool) -> RgbaImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return image.clone();
    }

    let radius = if is_text { TEXT_RADIUS } else { RADIUS };
    let kernel = emboss_kernel(radius, SIGMA);
    let size = (2 * radius + 1) as usize;

    let gray: Vec<f64> = image.pixels().map(|p| luma(p.0[0], p.0[1], p.0[2]) as f64).collect();
    let w = width as i32;
    let h = height as i32;

    let mut response = vec![0.0f64; gray.len()];
    for y in 0..h {
        for x in 0..w {
            let mut sum = 0.0;
            for (k, weight) in kernel.iter().enumerate().filter(|(_, k)| **k != 0.0) {
                let kx = (k % size) as i32 - radius;
                let ky = (k / size) as i32 - radius;
                // replicate border
                let sx = (x + kx).clamp(0, w - 1);
                let sy = (y + ky).clamp(0, h - 1);
                sum += gray[(sy * w + sx) as usize] * weight;
            }
            response[(y * w + x) as usize] = sum;
        }
    }

    let (min, max) = response
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    let span = max - min;

    RgbaImage::from_fn(width, height, |x, y| {
        let v = response[(y * width + x) as usize];
        let level = if span > f64::EPSILON {
            ((v - min) / span * 255.0).round() as u8
        } else {
            128
        };
        Rgba([level, level, level, image.get_pixel(x, y).0[3]])
    })
}
