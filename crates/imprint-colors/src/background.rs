//! Background detection and removal from histograms.
//!
//! [`detect_background`] looks at the four image corners; when at least
//! three of them share a nearest named color, that color is the
//! background. [`remove_most_likely_bg`] takes a declared background out of
//! a histogram before the statistics run, falling back to the most frequent
//! color when the background cannot be found.

use image::RgbaImage;
use serde::Serialize;

use crate::color::{nearest_named_color, Argb, NamedColor};
use crate::histogram::HistogramEntry;
use crate::palette::closest_color;
use crate::reduce::{ArgbColor, ColorDetail};

/// Corners that must agree for a background to be detected.
const MIN_MATCHING_CORNERS: usize = 3;

/// A detected background.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BackgroundHint {
    /// Nearest named color of the winning corner
    pub named: &'static NamedColor,
    /// Raw pixel at the winning corner
    pub corner: Argb,
    /// Nearest candidate when a candidate list was given
    pub mapped: Option<Argb>,
}

impl BackgroundHint {
    /// The background color: the candidate match if any, else the named
    /// color.
    pub fn color(&self) -> Argb {
        self.mapped.unwrap_or(self.named.color)
    }

    /// The background's name: the named color's name, or the key of the
    /// candidate match.
    pub fn name(&self) -> String {
        match self.mapped {
            Some(color) => color.name(),
            None => self.named.name.to_string(),
        }
    }

    /// Background detail to feed the reducer.
    pub fn to_detail(&self) -> ColorDetail {
        ColorDetail {
            uuid: String::new(),
            original: ArgbColor::named(self.color(), self.name()),
            mapped: None,
            percentage: 0.0,
            visible: false,
            primary: false,
            background: true,
        }
    }
}

/// Corner sample positions: top-left, bottom-left, top-right, bottom-right.
///
/// Positions are inset by `offset` and clamped into the image.
fn corners(width: u32, height: u32, offset: u32) -> [(u32, u32); 4] {
    let max_x = width.saturating_sub(1);
    let max_y = height.saturating_sub(1);
    let near_x = offset.min(max_x);
    let near_y = offset.min(max_y);
    let far_x = width.saturating_sub(offset).min(max_x);
    let far_y = height.saturating_sub(offset).min(max_y);
    [
        (near_x, near_y),
        (near_x, far_y),
        (far_x, near_y),
        (far_x, far_y),
    ]
}

fn corner_named(image: &RgbaImage, (x, y): (u32, u32)) -> (&'static NamedColor, Argb) {
    let raw = Argb::from_rgba(image.get_pixel(x, y).0);
    let lookup = if raw.is_transparent() {
        Argb::TRANSPARENT
    } else {
        raw
    };
    (nearest_named_color(lookup), raw)
}

/// Detect the background from the image corners.
///
/// Corners are tried in order; the first whose nearest named color is
/// shared by at least three corners wins. With `candidates`, the result is
/// additionally matched to the closest candidate.
///
/// Returns `None` for an empty image or when no corner reaches three
/// matches.
pub fn detect_background(image: &RgbaImage, offset: u32, candidates: Option<&[Argb]>) -> Option<BackgroundHint> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return None;
    }

    let samples = corners(width, height, offset).map(|p| corner_named(image, p));

    for (named, corner) in samples {
        let matched = samples
            .iter()
            .filter(|(other, _)| other.color == named.color)
            .count();
        if matched < MIN_MATCHING_CORNERS {
            continue;
        }

        let mapped = candidates
            .and_then(|list| closest_color(list, named.color).map(|(idx, _)| list[idx]));
        tracing::debug!(
            background = named.name,
            matched,
            mapped = ?mapped.map(|c| c.to_string()),
            "background detected"
        );
        return Some(BackgroundHint {
            named,
            corner,
            mapped,
        });
    }

    tracing::debug!("no background detected");
    None
}

fn position_by_key(histogram: &[HistogramEntry], key: &str) -> Option<usize> {
    histogram.iter().position(|e| e.color.name() == key)
}

fn position_by_keys(histogram: &[HistogramEntry], keys: &[&str]) -> Option<usize> {
    histogram.iter().position(|e| {
        let name = e.color.name();
        keys.iter().any(|k| name == *k)
    })
}

/// Remove the declared background from `histogram`.
///
/// The match ladder depends on the background's name (case-insensitive):
///
/// - `transparent`: the transparent entry
/// - `black` / `ff000000`: transparent, else the background's own key or
///   pure black
/// - `white` / `ffffffff`: transparent, else the background's own key or
///   pure white
/// - anything else: transparent, else the background's key, else the first
///   entry with the same nearest named color
///
/// When nothing matches, the first (most frequent) entry is removed and
/// `true` is returned to signal the guess. Without a background, or with an
/// empty histogram, nothing is removed.
pub fn remove_most_likely_bg(background: Option<&ColorDetail>, histogram: &mut Vec<HistogramEntry>) -> bool {
    let Some(bg) = background else {
        return false;
    };
    if histogram.is_empty() {
        return false;
    }

    let bg_name = bg.original.name.as_str();
    let transparent = position_by_key(histogram, "0");

    let found = match bg_name.to_uppercase().as_str() {
        "TRANSPARENT" => transparent,
        "BLACK" | "FF000000" => {
            transparent.or_else(|| position_by_keys(histogram, &[bg_name, "ff000000", "000000"]))
        }
        "WHITE" | "FFFFFFFF" => {
            transparent.or_else(|| position_by_keys(histogram, &[bg_name, "ffffff", "ffffffff"]))
        }
        _ => transparent
            .or_else(|| position_by_key(histogram, bg_name))
            .or_else(|| {
                let approximate = nearest_named_color(bg.original.argb()).name;
                histogram
                    .iter()
                    .position(|e| nearest_named_color(e.color).name == approximate)
            }),
    };

    match found {
        Some(idx) => {
            histogram.remove(idx);
            false
        }
        None => {
            let guessed = histogram.remove(0);
            tracing::debug!(
                background = bg_name,
                removed = %guessed.color,
                "background not in histogram, removed most frequent color"
            );
            true
        }
    }
}
