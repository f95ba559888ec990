//! Pairwise color metrics and similar-neighbor lists.
//!
//! [`generate_metrics`] turns a histogram into one [`ColorCompareData`] per
//! entry. Each record carries the distances to every other entry and three
//! filtered, ascending neighbor lists (Delta-E, hue, RGB) that are merged
//! into the `parent_colors` list the resolver walks.

use serde::Serialize;

use crate::color::{full_compare, hue_distance, rgb_distance, Argb};
use crate::histogram::HistogramEntry;
use crate::palette::ColorBook;

use super::options::Cuts;

/// Distances from a color to one other histogram color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparedColor {
    /// The other color
    pub color: Argb,
    /// RGB Euclidean distance
    pub rgb_distance: i32,
    /// Rounded Delta-E
    pub delta_e: i32,
    /// Hue distance
    pub hue: f32,
    /// The other color's share of the image
    pub percentage: f32,
}

/// A directed "is similar to" edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimilarColor {
    /// The neighbor
    pub color: Argb,
    /// Hue distance to the neighbor
    pub hue: f32,
    /// Rounded Delta-E to the neighbor
    pub delta_e: f32,
    /// RGB distance to the neighbor
    pub rgb_distance: f32,
    /// The color whose list this edge belongs to
    pub parent: Argb,
}

impl SimilarColor {
    fn from_compared(parent: Argb, c: &ComparedColor) -> Self {
        Self {
            color: c.color,
            hue: c.hue,
            delta_e: c.delta_e as f32,
            rgb_distance: c.rgb_distance as f32,
            parent,
        }
    }
}

/// Per-color comparison record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorCompareData {
    /// The histogram color
    pub original: Argb,
    /// Nearest color book color (or `Transparent`)
    pub bel: Argb,
    /// Pixels of this color
    pub pixel_count: u32,
    /// Share of the image, `0..=100`
    pub percentage: f32,
    /// Whether the color survived the std-dev filter
    pub pass_std_dev: bool,
    /// False once the color is collapsed
    pub primary: bool,
    /// The color this one collapsed into, if any
    pub predominant: Option<Argb>,
    /// Distances to every other color
    pub compared: Vec<ComparedColor>,
    /// Merged neighbor list walked by the resolver
    pub parent_colors: Vec<SimilarColor>,
    /// Neighbors with Delta-E under the cut, ascending
    pub parent_delta_e: Vec<SimilarColor>,
    /// Neighbors with hue distance under the cut, ascending
    pub parent_hue: Vec<SimilarColor>,
    /// Neighbors with RGB distance under the cut, ascending
    pub parent_rgb: Vec<SimilarColor>,
}

#[inline]
fn percentage(count: u32, total: u64) -> f32 {
    if total == 0 {
        return 0.0;
    }
    (count as f32 / total as f32) * 100.0
}

/// Average percentage of the entries at `[passed..]`.
///
/// Returns `None` when every entry passed.
pub fn tail_average_percentage(histogram: &[HistogramEntry], total: u64, passed: usize) -> Option<f32> {
    if passed >= histogram.len() {
        return None;
    }
    let tail = &histogram[passed..];
    let sum: f32 = tail.iter().map(|e| percentage(e.count, total)).sum();
    Some(sum / tail.len() as f32)
}

/// Build comparison records for every histogram entry.
///
/// `passed` is the number of entries that survived the std-dev filter; when
/// it is less than the histogram length, the hue gate's percentage cut is
/// replaced by the average percentage of the tail (see
/// [`tail_average_percentage`]). The result is sorted by descending
/// percentage (stable).
pub fn generate_metrics(
    histogram: &[HistogramEntry],
    total: u64,
    passed: usize,
    cuts: &Cuts,
    book: &ColorBook,
) -> Vec<ColorCompareData> {
    let mut cuts = *cuts;
    if let Some(avg) = tail_average_percentage(histogram, total, passed) {
        tracing::debug!(
            passed,
            entries = histogram.len(),
            percentage_cut = avg,
            "percentage cut replaced by tail average"
        );
        cuts.percentage = avg;
    }

    let mut results: Vec<ColorCompareData> = histogram
        .iter()
        .map(|entry| {
            let color = entry.color;
            let compared: Vec<ComparedColor> = histogram
                .iter()
                .filter(|other| other.color != color)
                .map(|other| ComparedColor {
                    color: other.color,
                    rgb_distance: rgb_distance(color, other.color),
                    delta_e: full_compare(color, other.color),
                    hue: hue_distance(color, other.color),
                    percentage: percentage(other.count, total),
                })
                .collect();

            let mut data = ColorCompareData {
                original: color,
                bel: book.closest(color).0,
                pixel_count: entry.count,
                percentage: percentage(entry.count, total),
                pass_std_dev: false,
                primary: true,
                predominant: None,
                compared,
                parent_colors: Vec::new(),
                parent_delta_e: Vec::new(),
                parent_hue: Vec::new(),
                parent_rgb: Vec::new(),
            };
            build_similar_lists(&mut data, &cuts);
            data
        })
        .collect();

    results.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    results
}

fn filtered_sorted<K, F>(data: &ColorCompareData, keep: F, key: K) -> Vec<SimilarColor>
where
    F: Fn(&ComparedColor) -> bool,
    K: Fn(&ComparedColor) -> f32,
{
    let mut list: Vec<&ComparedColor> = data.compared.iter().filter(|c| keep(*c)).collect();
    list.sort_by(|a, b| key(*a).total_cmp(&key(*b)));
    list.into_iter()
        .map(|c| SimilarColor::from_compared(data.original, c))
        .collect()
}

fn build_similar_lists(data: &mut ColorCompareData, cuts: &Cuts) {
    data.parent_delta_e = filtered_sorted(
        data,
        |c| (c.delta_e as f32) < cuts.delta_e,
        |c| c.delta_e as f32,
    );
    data.parent_hue = filtered_sorted(data, |c| c.hue < cuts.hue, |c| c.hue);
    data.parent_rgb = filtered_sorted(
        data,
        |c| (c.rgb_distance as f32) < cuts.rgb,
        |c| c.rgb_distance as f32,
    );

    let mut parents = merge_parent_colors(&data.parent_delta_e, &data.parent_rgb);

    for hue_color in &data.parent_hue {
        let neighbor_pct = data
            .compared
            .iter()
            .find(|c| c.color == hue_color.color)
            .map(|c| c.percentage)
            .unwrap_or(0.0);
        if neighbor_pct - data.percentage > cuts.percentage {
            continue;
        }

        if let Some(existing) = parents.iter_mut().find(|p| p.color == hue_color.color) {
            existing.hue = hue_color.hue;
            continue;
        }
        parents.push(*hue_color);
    }

    data.parent_colors = parents;
}

/// Merge the Delta-E and RGB neighbor lists.
///
/// Walks the Delta-E list by index: entry `i` is kept when the RGB list has
/// no entry `i`, or when RGB entry `i` is the same color. The lists are
/// compared by position, not by identity.
pub fn merge_parent_colors(delta_e: &[SimilarColor], rgb: &[SimilarColor]) -> Vec<SimilarColor> {
    delta_e
        .iter()
        .enumerate()
        .filter(|(i, d)| rgb.get(*i).map_or(true, |r| r.color == d.color))
        .map(|(_, d)| *d)
        .collect()
}
