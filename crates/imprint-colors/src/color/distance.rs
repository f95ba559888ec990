//! Color distance metrics
//!
//! All metrics here are pure functions over [`Argb`]. Which metric a caller
//! uses matters: the pipeline mixes RGB Euclidean distance (fast nearest
//! match), D65 Delta-E (merge decisions) and hue distance (hue neighbors).

use super::argb::Argb;
use super::lab::{rgb_to_lab, Lab};

/// Euclidean distance in RGB, truncated to an integer. Alpha is ignored.
#[inline]
pub fn rgb_distance(c1: Argb, c2: Argb) -> i32 {
    let dr = c1.r as i32 - c2.r as i32;
    let dg = c1.g as i32 - c2.g as i32;
    let db = c1.b as i32 - c2.b as i32;
    ((dr * dr + dg * dg + db * db) as f64).sqrt() as i32
}

/// CIE76 Delta-E between two colors using the D65 conversion.
#[inline]
pub fn delta_e(c1: Argb, c2: Argb) -> f64 {
    Lab::from_rgb(c1.r, c1.g, c1.b).distance(&Lab::from_rgb(c2.r, c2.g, c2.b))
}

/// [`delta_e`] rounded half-to-even to an integer.
///
/// This is the Delta-E value stored on similar-color edges and used by the
/// color book re-rank.
#[inline]
pub fn full_compare(c1: Argb, c2: Argb) -> i32 {
    delta_e(c1, c2).round_ties_even() as i32
}

/// CIE76 distance between the integer D50 Lab triples of two colors.
pub fn color_difference(c1: Argb, c2: Argb) -> f64 {
    let lab1 = rgb_to_lab(c1.r, c1.g, c1.b);
    let lab2 = rgb_to_lab(c2.r, c2.g, c2.b);
    let sum: i64 = lab1
        .iter()
        .zip(lab2.iter())
        .map(|(a, b)| {
            let d = (*b - *a) as i64;
            d * d
        })
        .sum();
    (sum as f64).sqrt()
}

/// Distance of the first color's hue from the mean of both hues.
///
/// Note this is half the plain hue difference and does not wrap around
/// 360 degrees.
#[inline]
pub fn hue_distance(c1: Argb, c2: Argb) -> f32 {
    let h1 = c1.hue();
    let avg = (h1 + c2.hue()) / 2.0;
    (h1 - avg).abs()
}

/// Weighted channel test: does `a` lie within `tolerance` of any candidate?
///
/// Each RGB difference contributes `(1 + d²)·a.A / 256` (integer division
/// per channel) and the alpha difference contributes `d²`. A candidate
/// matches when the sum is at most `tolerance²·4`.
pub fn check_color<'a, I>(a: Argb, candidates: I, tolerance: i32) -> bool
where
    I: IntoIterator<Item = &'a Argb>,
{
    let limit = tolerance * tolerance * 4;
    let alpha = a.a as i32;
    candidates.into_iter().any(|b| {
        let channel = |x: u8, y: u8| {
            let d = x as i32 - y as i32;
            (1 + d * d) * alpha / 256
        };
        let da = a.a as i32 - b.a as i32;
        let sum = channel(a.r, b.r) + channel(a.g, b.g) + channel(a.b, b.b) + da * da;
        sum <= limit
    })
}
