//! Map resolved colors onto the color book.
//!
//! Every surviving record becomes a [`ColorDetail`]. Records that map to
//! the same book color share a uuid; the first owns visibility.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::color::Argb;
use crate::palette::ColorBook;

use super::metrics::ColorCompareData;

/// A color as exposed to API callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgbColor {
    /// Alpha
    pub a: u8,
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Lookup key or color name
    pub name: String,
    /// `#RRGGBB` of the color this one was derived from, when relevant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
}

impl ArgbColor {
    /// Channel values as an [`Argb`].
    #[inline]
    pub fn argb(&self) -> Argb {
        Argb::new(self.a, self.r, self.g, self.b)
    }

    /// A color with an explicit name.
    pub fn named(color: Argb, name: impl Into<String>) -> Self {
        Self {
            a: color.a,
            r: color.r,
            g: color.g,
            b: color.b,
            name: name.into(),
            hex: None,
        }
    }
}

impl From<Argb> for ArgbColor {
    fn from(color: Argb) -> Self {
        Self::named(color, color.name())
    }
}

/// One output color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorDetail {
    /// Merge-group identity, 32 lowercase hex chars
    pub uuid: String,
    /// Color found in the image
    pub original: ArgbColor,
    /// Book color it maps to
    #[serde(default)]
    pub mapped: Option<ArgbColor>,
    /// Share of the image
    pub percentage: f32,
    /// Whether this detail owns its uuid group
    pub visible: bool,
    /// False when the color collapsed into another
    pub primary: bool,
    /// Whether this describes the background
    #[serde(default)]
    pub background: bool,
}

impl ColorDetail {
    /// Key of the mapped color, empty when unmapped.
    pub fn mapped_name(&self) -> &str {
        self.mapped.as_ref().map_or("", |m| m.name.as_str())
    }
}

/// Source of merge-group identifiers.
pub trait IdSource {
    /// A fresh identifier.
    fn next_id(&mut self) -> String;
}

/// Random 128-bit identifiers rendered as 32 hex chars.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&mut self) -> String {
        let mut bytes = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    }
}

/// Deterministic identifiers `000…001`, `000…002`, …
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    next: u128,
}

impl SequentialIds {
    /// Start counting at 1.
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        self.next += 1;
        format!("{:032x}", self.next)
    }
}

/// Fill in the background's mapped color.
///
/// The mapped color carries the book color's key as name and the
/// background's own `#RRGGBB` as `hex`.
pub fn map_background(bg: &ColorDetail, book: &ColorBook) -> ColorDetail {
    let original = bg.original.argb();
    let (mapped, _) = book.closest(original);
    let mut mapped = ArgbColor::from(mapped);
    mapped.hex = Some(original.hex());

    ColorDetail {
        mapped: Some(mapped),
        background: true,
        ..bg.clone()
    }
}

/// Map resolved records onto the book.
///
/// `background` must already be mapped (see [`map_background`]). When
/// `relink_predominant` is set, a collapsed record whose predominant color
/// has already been emitted joins that record's group, unless it maps to
/// the background's book color.
pub fn map_colors(
    results: &[ColorCompareData],
    book: &ColorBook,
    background: Option<&ColorDetail>,
    relink_predominant: bool,
    ids: &mut dyn IdSource,
) -> Vec<ColorDetail> {
    let mut details: Vec<ColorDetail> = Vec::with_capacity(results.len());

    for result in results {
        let (mapped, _) = book.closest(result.original);
        let mut mapped = ArgbColor::from(mapped);

        let (mut uuid, mut visible) = match details.iter().find(|d| d.mapped_name() == mapped.name) {
            Some(existing) => (existing.uuid.clone(), false),
            None => (ids.next_id(), true),
        };

        if relink_predominant && !result.primary {
            if let Some(predominant) = result.predominant {
                let maps_to_background = background
                    .is_some_and(|bg| bg.mapped_name().eq_ignore_ascii_case(&mapped.name));
                if !maps_to_background {
                    let owner_name = predominant.name();
                    if let Some(owner) = details.iter().find(|d| d.original.name == owner_name) {
                        uuid = owner.uuid.clone();
                        mapped = owner.mapped.clone().unwrap_or(mapped);
                        visible = false;
                    }
                }
            }
        }

        details.push(ColorDetail {
            uuid,
            original: ArgbColor::from(result.original),
            mapped: Some(mapped),
            percentage: result.percentage,
            visible,
            primary: result.primary,
            background: false,
        });
    }

    details
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(color: Argb, pct: f32, primary: bool, predominant: Option<Argb>) -> ColorCompareData {
        ColorCompareData {
            original: color,
            bel: color,
            pixel_count: pct as u32,
            percentage: pct,
            pass_std_dev: true,
            primary,
            predominant,
            compared: Vec::new(),
            parent_colors: Vec::new(),
            parent_delta_e: Vec::new(),
            parent_hue: Vec::new(),
            parent_rgb: Vec::new(),
        }
    }

    fn book() -> ColorBook {
        ColorBook::from_hex(&[("#FF0000", "Red"), ("#00FF00", "Green"), ("#FFFFFF", "White")]).unwrap()
    }

    #[test]
    fn test_shared_mapping_shares_uuid() {
        let results = [
            record(Argb::opaque(250, 0, 0), 60.0, true, None),
            record(Argb::opaque(230, 10, 10), 30.0, true, None),
            record(Argb::opaque(0, 250, 0), 10.0, true, None),
        ];
        let details = map_colors(&results, &book(), None, false, &mut SequentialIds::new());

        assert_eq!(details.len(), 3);
        assert_eq!(details[0].uuid, details[1].uuid);
        assert!(details[0].visible);
        assert!(!details[1].visible);
        assert_ne!(details[2].uuid, details[0].uuid);
        assert!(details[2].visible);
        assert_eq!(details[0].mapped_name(), "ffff0000");
    }

    #[test]
    fn test_predominant_relink() {
        let green = Argb::opaque(0, 250, 0);
        let results = [
            record(green, 60.0, true, None),
            // maps to red on its own, but collapsed into green
            record(Argb::opaque(250, 0, 0), 30.0, false, Some(green)),
        ];
        let details = map_colors(&results, &book(), None, true, &mut SequentialIds::new());
        assert_eq!(details[1].uuid, details[0].uuid);
        assert_eq!(details[1].mapped_name(), "ff00ff00");
        assert!(!details[1].visible);
        assert!(!details[1].primary);

        let details = map_colors(&results, &book(), None, false, &mut SequentialIds::new());
        assert_ne!(details[1].uuid, details[0].uuid);
        assert_eq!(details[1].mapped_name(), "ffff0000");
    }

    #[test]
    fn test_no_relink_into_background_mapping() {
        let green = Argb::opaque(0, 250, 0);
        let bg = ColorDetail {
            uuid: String::new(),
            original: ArgbColor::named(Argb::opaque(255, 5, 5), "Red"),
            mapped: None,
            percentage: 0.0,
            visible: false,
            primary: false,
            background: true,
        };
        let bg = map_background(&bg, &book());
        assert_eq!(bg.mapped_name(), "ffff0000");
        assert_eq!(bg.mapped.as_ref().and_then(|m| m.hex.clone()), Some("#FF0505".to_string()));

        let results = [
            record(green, 60.0, true, None),
            record(Argb::opaque(250, 0, 0), 30.0, false, Some(green)),
        ];
        let details = map_colors(&results, &book(), Some(&bg), true, &mut SequentialIds::new());
        assert_ne!(details[1].uuid, details[0].uuid);
    }

    #[test]
    fn test_id_sources() {
        let mut seq = SequentialIds::new();
        assert_eq!(seq.next_id(), "00000000000000000000000000000001");
        assert_eq!(seq.next_id(), "00000000000000000000000000000002");

        let id = RandomIds.next_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
