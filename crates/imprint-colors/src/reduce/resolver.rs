//! Similar-color resolution.
//!
//! Resolution runs in two phases:
//!
//! 1. [`resolve_collapses`] walks every `(color, neighbor)` edge of the
//!    metric results and records which color collapses into which in a
//!    [`CollapseMap`]. The first decision recorded for a color wins.
//! 2. [`apply_collapses`] produces a new list where each collapsed color
//!    has `primary = false` and `predominant` set to its target.
//!
//! A `None` target is a mutual collapse: two near-identical small colors
//! where neither is a clear owner.
//!
//! # Decision table
//!
//! For an edge from `result` to `parent` (`parent` is in `result`'s
//! neighbor list):
//!
//! | result passed | parent passed | outcome                                  |
//! |---------------|---------------|------------------------------------------|
//! | no            | yes           | result → parent                          |
//! | no            | no            | smaller → larger                         |
//! | yes           | no            | parent → result                          |
//! | yes           | yes           | neutral or general branch (see below)    |
//!
//! Both passed, and either color is pure black/white or `result` is nearest
//! to the named colors Black/White, with more than two colors overall: the
//! neutral branch gates on Delta-E or RGB distance. Otherwise the general
//! branch also accepts the hue distance. In both branches the pixel counts
//! must differ, and small close pairs (gap < 1.5 %) become mutual collapses.

use crate::color::{nearest_named_color, Argb};

use super::metrics::{ColorCompareData, SimilarColor};
use super::options::Cuts;

const PURE_WHITE: &str = "ffffffff";
const PURE_BLACK: &str = "ff000000";

/// Percentage gap below which two colors count as equally present.
const CLOSE_PERCENTAGE_GAP: f32 = 1.5;
/// Percentage below which a color counts as minor.
const MINOR_PERCENTAGE: f32 = 2.0;

/// Ordered collapse decisions: color → the color it collapses into.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollapseMap {
    entries: Vec<(Argb, Option<Argb>)>,
}

impl CollapseMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a decision unless `color` already has one.
    ///
    /// Returns whether the decision was recorded.
    pub fn insert(&mut self, color: Argb, target: Option<Argb>) -> bool {
        if self.contains(color) {
            return false;
        }
        tracing::trace!(
            color = %color,
            into = ?target.map(|t| t.to_string()),
            "collapse"
        );
        self.entries.push((color, target));
        true
    }

    /// Whether `color` has a decision.
    pub fn contains(&self, color: Argb) -> bool {
        self.entries.iter().any(|(c, _)| *c == color)
    }

    /// The decision for `color`: `Some(target)` if one was recorded.
    pub fn get(&self, color: Argb) -> Option<Option<Argb>> {
        self.entries
            .iter()
            .find(|(c, _)| *c == color)
            .map(|(_, target)| *target)
    }

    /// Number of collapsed colors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing collapsed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decisions in the order they were made.
    pub fn iter(&self) -> impl Iterator<Item = &(Argb, Option<Argb>)> {
        self.entries.iter()
    }

    fn larger_absorbs(&mut self, result: &ColorCompareData, parent: &ColorCompareData) {
        if result.pixel_count > parent.pixel_count {
            self.insert(parent.original, Some(result.original));
        } else {
            self.insert(result.original, Some(parent.original));
        }
    }

    fn mutual(&mut self, a: Argb, b: Argb) {
        self.insert(b, None);
        self.insert(a, None);
    }
}

fn is_neutral_key(key: &str) -> bool {
    key == PURE_WHITE || key == PURE_BLACK
}

fn is_neutral_name(name: &str) -> bool {
    name.eq_ignore_ascii_case("white") || name.eq_ignore_ascii_case("black")
}

/// Whether any neighbor of `result` is black or white, by key or by
/// nearest named color.
fn neighbors_reference_neutral(result: &ColorCompareData) -> bool {
    let by_key = result
        .parent_colors
        .iter()
        .any(|p| is_neutral_key(&p.color.name()));
    let by_name = result
        .parent_colors
        .iter()
        .any(|p| is_neutral_name(nearest_named_color(p.color).name));
    by_key || by_name
}

fn decide_passed_pair(
    map: &mut CollapseMap,
    result: &ColorCompareData,
    edge: &SimilarColor,
    parent: &ColorCompareData,
    color_count: usize,
    cuts: &Cuts,
) {
    let approximate = nearest_named_color(result.original);
    let neutral = (is_neutral_key(&result.original.name())
        || is_neutral_key(&edge.color.name())
        || is_neutral_name(approximate.name))
        && color_count > 2;

    let counts_differ = result.pixel_count != parent.pixel_count;
    let gap = (parent.percentage - result.percentage).abs();
    let both_minor = parent.percentage < MINOR_PERCENTAGE && result.percentage < MINOR_PERCENTAGE;

    if neutral {
        let close = edge.delta_e <= cuts.delta_e || edge.rgb_distance <= cuts.rgb;
        if !(close && counts_differ) {
            return;
        }
        if gap < CLOSE_PERCENTAGE_GAP && both_minor {
            map.mutual(result.original, edge.color);
        } else {
            map.larger_absorbs(result, parent);
        }
        return;
    }

    let close = edge.delta_e <= cuts.delta_e
        || edge.rgb_distance <= cuts.rgb
        || edge.hue <= cuts.hue;
    if !(close && counts_differ) {
        return;
    }

    if gap < CLOSE_PERCENTAGE_GAP {
        if neighbors_reference_neutral(result) || both_minor {
            map.mutual(result.original, edge.color);
        } else {
            map.larger_absorbs(result, parent);
        }
    } else {
        map.larger_absorbs(result, parent);
    }
}

/// Phase 1: decide which colors collapse.
///
/// Walks `data` in order, and each record's `parent_colors` in order.
/// Only `delta_e`, `hue` and `rgb` of `cuts` are used.
pub fn resolve_collapses(data: &[ColorCompareData], cuts: &Cuts) -> CollapseMap {
    let mut map = CollapseMap::new();

    for result in data {
        for edge in &result.parent_colors {
            let Some(parent) = data.iter().find(|d| d.original == edge.color) else {
                continue;
            };

            match (result.pass_std_dev, parent.pass_std_dev) {
                (true, false) => {
                    map.insert(edge.color, Some(result.original));
                }
                (true, true) => decide_passed_pair(&mut map, result, edge, parent, data.len(), cuts),
                (false, true) => {
                    map.insert(result.original, Some(edge.color));
                }
                (false, false) => map.larger_absorbs(result, parent),
            }
        }
    }

    tracing::debug!(colors = data.len(), collapsed = map.len(), "similar colors resolved");
    map
}

/// Phase 2: a copy of `data` with the collapse decisions applied.
pub fn apply_collapses(data: &[ColorCompareData], map: &CollapseMap) -> Vec<ColorCompareData> {
    data.iter()
        .cloned()
        .map(|mut d| {
            if let Some(target) = map.get(d.original) {
                d.primary = false;
                d.predominant = target;
            }
            d
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(color: Argb, count: u32, pct: f32, pass: bool, parents: &[(Argb, f32, f32, f32)]) -> ColorCompareData {
        ColorCompareData {
            original: color,
            bel: color,
            pixel_count: count,
            percentage: pct,
            pass_std_dev: pass,
            primary: true,
            predominant: None,
            compared: Vec::new(),
            parent_colors: parents
                .iter()
                .map(|&(c, delta_e, rgb_distance, hue)| SimilarColor {
                    color: c,
                    hue,
                    delta_e,
                    rgb_distance,
                    parent: color,
                })
                .collect(),
            parent_delta_e: Vec::new(),
            parent_hue: Vec::new(),
            parent_rgb: Vec::new(),
        }
    }

    const CUTS: Cuts = Cuts::new(8.0, 3.0, 25.0, 1.0);

    const RED: Argb = Argb::opaque(200, 30, 30);
    const DARK_RED: Argb = Argb::opaque(190, 30, 30);
    const BLUE: Argb = Argb::opaque(30, 30, 200);

    #[test]
    fn test_larger_absorbs_smaller() {
        let list = [
            data(RED, 500, 50.0, true, &[(DARK_RED, 3.0, 10.0, 0.0)]),
            data(DARK_RED, 400, 40.0, true, &[(RED, 3.0, 10.0, 0.0)]),
            data(BLUE, 100, 10.0, true, &[]),
        ];
        let map = resolve_collapses(&list, &CUTS);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(DARK_RED), Some(Some(RED)));

        let applied = apply_collapses(&list, &map);
        assert!(applied[0].primary);
        assert!(!applied[1].primary);
        assert_eq!(applied[1].predominant, Some(RED));
        // input is untouched
        assert!(list[1].primary);
    }

    #[test]
    fn test_non_passing_result_defers_to_parent() {
        let list = [
            data(RED, 500, 50.0, true, &[]),
            data(DARK_RED, 10, 1.0, false, &[(RED, 30.0, 90.0, 40.0)]),
        ];
        let map = resolve_collapses(&list, &CUTS);
        assert_eq!(map.get(DARK_RED), Some(Some(RED)));
    }

    #[test]
    fn test_passing_result_absorbs_failing_parent() {
        let list = [
            data(RED, 500, 50.0, true, &[(DARK_RED, 30.0, 90.0, 40.0)]),
            data(DARK_RED, 10, 1.0, false, &[]),
        ];
        let map = resolve_collapses(&list, &CUTS);
        assert_eq!(map.get(DARK_RED), Some(Some(RED)));
    }

    #[test]
    fn test_small_close_pair_is_mutual() {
        let list = [
            data(BLUE, 900, 90.0, true, &[]),
            data(RED, 15, 1.5, true, &[(DARK_RED, 3.0, 10.0, 0.0)]),
            data(DARK_RED, 10, 1.0, true, &[]),
        ];
        let map = resolve_collapses(&list, &CUTS);
        assert_eq!(map.get(RED), Some(None));
        assert_eq!(map.get(DARK_RED), Some(None));
    }

    #[test]
    fn test_equal_counts_never_collapse() {
        let list = [
            data(RED, 100, 50.0, true, &[(DARK_RED, 1.0, 1.0, 0.0)]),
            data(DARK_RED, 100, 50.0, true, &[(RED, 1.0, 1.0, 0.0)]),
        ];
        assert!(resolve_collapses(&list, &CUTS).is_empty());
    }

    #[test]
    fn test_neutral_branch_ignores_hue() {
        let white = Argb::WHITE;
        let ivory = Argb::opaque(250, 250, 235);
        let list = [
            data(white, 600, 60.0, true, &[(ivory, 20.0, 40.0, 0.0)]),
            data(ivory, 300, 30.0, true, &[]),
            data(BLUE, 100, 10.0, true, &[]),
        ];
        // hue distance 0 would pass the general gate, but white is neutral
        assert!(resolve_collapses(&list, &CUTS).is_empty());
    }

    #[test]
    fn test_first_decision_wins() {
        let mut map = CollapseMap::new();
        assert!(map.insert(RED, Some(BLUE)));
        assert!(!map.insert(RED, None));
        assert_eq!(map.get(RED), Some(Some(BLUE)));
        assert_eq!(map.get(BLUE), None);
    }
}
