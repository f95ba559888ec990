//! The two reduction strategies.
//!
//! - **Whole image**: the histogram of the quantized image is filtered by
//!   the std-dev cut and resolved with the `pass_sd` cut set. Collapsed
//!   colors are re-linked to the group of their predominant color.
//! - **Tiled**: colors are selected from the whole image plus the dominant
//!   color of every tile, so small-area colors survive. All selected colors
//!   count as passing.

use image::RgbaImage;

use crate::background::remove_most_likely_bg;
use crate::color::Argb;
use crate::histogram::{histogram, tiles, total_pixels, HistogramEntry};
use crate::palette::ColorBook;

use super::mapper::{map_colors, ColorDetail, IdSource};
use super::metrics::{generate_metrics, ColorCompareData};
use super::options::Thresholds;
use super::resolver::{apply_collapses, resolve_collapses};
use super::stats::filter_by_std_dev;

/// Entries under this share of the image are dropped before the whole-image
/// statistics.
const MIN_PERCENTAGE: f32 = 0.1;

/// Everything a strategy needs besides the histogram.
pub(crate) struct StrategyContext<'a> {
    pub book: &'a ColorBook,
    pub thresholds: &'a Thresholds,
    /// Background hint with its mapped color filled in
    pub background: Option<&'a ColorDetail>,
}

/// Strategy output: mapped details plus the metric results before
/// collapsing.
#[derive(Debug, Default)]
pub(crate) struct StrategyResult {
    pub details: Vec<ColorDetail>,
    pub similar: Vec<ColorCompareData>,
}

/// Whole-image strategy over a histogram sorted by descending count.
pub(crate) fn whole_image(
    ctx: &StrategyContext<'_>,
    sorted: &[HistogramEntry],
    ids: &mut dyn IdSource,
) -> StrategyResult {
    let total = total_pixels(sorted);
    let mut working = sorted.to_vec();

    remove_most_likely_bg(ctx.background, &mut working);

    working.retain(|e| (e.count as f32 / total as f32) * 100.0 >= MIN_PERCENTAGE);
    if working.is_empty() {
        tracing::debug!("no colors above the minimum share");
        return StrategyResult::default();
    }

    let passed = filter_by_std_dev(&working);
    tracing::debug!(
        colors = working.len(),
        passed = passed.len(),
        "whole-image histogram filtered"
    );

    let mut results = generate_metrics(&working, total, passed.len(), &ctx.thresholds.cut, ctx.book);
    for result in &mut results {
        result.pass_std_dev = passed.iter().any(|p| p.color.name() == result.original.name());
    }

    let collapses = resolve_collapses(&results, &ctx.thresholds.pass_sd);
    let resolved = apply_collapses(&results, &collapses);
    let details = map_colors(&resolved, ctx.book, ctx.background, true, ids);

    StrategyResult {
        details,
        similar: results,
    }
}

/// Whether a histogram color is the declared background, by key or by the
/// background's own color.
fn is_background(color: Argb, bg: &ColorDetail) -> bool {
    let key = color.name();
    key == bg.original.name || key == bg.original.argb().name()
}

/// Tiled strategy over the quantized image and its sorted histogram.
pub(crate) fn tiled(
    ctx: &StrategyContext<'_>,
    image: &RgbaImage,
    tile_count: u32,
    sorted: &[HistogramEntry],
    ids: &mut dyn IdSource,
) -> StrategyResult {
    let (width, height) = image.dimensions();
    let tile_count = tile_count.max(1);
    let grid = tiles(image, width / tile_count, height / tile_count);

    let mut selected: Vec<HistogramEntry> = Vec::new();
    let mut select = |entry: &HistogramEntry| {
        if !selected.iter().any(|s| s.color == entry.color) {
            selected.push(*entry);
        }
    };

    let mut whole = sorted.to_vec();
    remove_most_likely_bg(ctx.background, &mut whole);
    if !whole.is_empty() {
        for entry in &filter_by_std_dev(&whole) {
            select(entry);
        }
    }

    for tile in &grid {
        let mut tile_histogram = histogram(tile);
        remove_most_likely_bg(ctx.background, &mut tile_histogram);
        if let Some(first) = filter_by_std_dev(&tile_histogram).first() {
            select(first);
        }
    }
    let selected_count = selected.len();

    let total = total_pixels(sorted);
    let mut working: Vec<HistogramEntry> = sorted
        .iter()
        .filter(|e| selected.iter().any(|s| s.color == e.color))
        .copied()
        .collect();

    if let Some(bg) = ctx.background {
        if selected_count > 1 {
            let bg_entry = sorted.iter().find(|e| is_background(e.color, bg));
            if let Some(entry) = bg_entry {
                if !working.iter().any(|w| w.color == entry.color) {
                    working.push(*entry);
                }
            }
        }
    }

    tracing::debug!(
        tiles = grid.len(),
        selected = selected_count,
        colors = working.len(),
        "tiled histogram selected"
    );

    let mut results = generate_metrics(
        &working,
        total,
        working.len(),
        &ctx.thresholds.tiled_metrics(),
        ctx.book,
    );
    for result in &mut results {
        result.pass_std_dev = true;
    }

    let collapses = resolve_collapses(&results, &ctx.thresholds.cut);
    let mut resolved = apply_collapses(&results, &collapses);

    if !resolved.is_empty() && resolved.iter().all(|r| !r.primary) {
        // everything collapsed; fall back to one record per book color
        resolved.clear();
        for result in &results {
            if !resolved.iter().any(|r| r.bel.name() == result.bel.name()) {
                resolved.push(result.clone());
            }
        }
    } else if resolved.len() == 1 && ctx.background.is_some_and(|bg| is_background(resolved[0].original, bg)) {
        // the background is the only color left; keep it
    } else if let (Some(bg), true) = (ctx.background, selected_count > 1) {
        if let Some(idx) = resolved.iter().position(|r| is_background(r.original, bg)) {
            resolved.remove(idx);
        }
    }

    let details = map_colors(&resolved, ctx.book, ctx.background, false, ids);

    StrategyResult {
        details,
        similar: results,
    }
}
