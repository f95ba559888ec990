//! ColorReducer builder: the entry point for reducing an image to book
//! colors.

use image::RgbaImage;
use serde::Serialize;

use crate::color::Argb;
use crate::histogram::{count_distinct_colors, histogram, quantize};
use crate::palette::ColorBook;
use crate::reduce::strategy::{tiled, whole_image, StrategyContext};
use crate::reduce::{map_background, ColorCompareData, ColorDetail, IdSource, RandomIds, Thresholds};

use super::error::ReduceError;

/// Images with at least this many distinct colors never use tiling.
pub const LARGE_IMAGE_COLORS: usize = 1000;

/// Default quantization budget.
pub const DEFAULT_QUANTIZE_COLORS: usize = 24;

/// Default tile grid size (tiles per side).
pub const DEFAULT_TILE_COUNT: u32 = 4;

/// Result of one reduction.
#[derive(Debug, Clone, Serialize)]
pub struct ReductionOutput {
    /// Output colors, most present first
    pub details: Vec<ColorDetail>,
    /// Metric results before collapsing
    pub similar: Vec<ColorCompareData>,
    /// Distinct colors after quantization
    pub histogram_colors: usize,
    /// Quantized colors, most frequent first
    pub histogram: Vec<Argb>,
    /// The background hint with its mapped color filled in
    pub background: Option<ColorDetail>,
}

impl ReductionOutput {
    /// Details that own their uuid group.
    pub fn visible(&self) -> impl Iterator<Item = &ColorDetail> {
        self.details.iter().filter(|d| d.visible)
    }
}

/// Reduces images to a deduplicated list of color book colors.
///
/// # Design
///
/// - Constructor requires a [`ColorBook`] (no invalid states)
/// - Configuration methods consume and return `self`
/// - [`reduce()`](Self::reduce) takes `&self` so one reducer serves many
///   images; the input image is never modified
///
/// # Example
///
/// ```
/// use image::{Rgba, RgbaImage};
/// use imprint_colors::{ColorBook, ColorReducer};
///
/// let book = ColorBook::from_hex(&[("#FF0000", "Red"), ("#FFFFFF", "White")]).unwrap();
/// let reducer = ColorReducer::new(book).tile_count(1);
///
/// let image = RgbaImage::from_pixel(8, 8, Rgba([250, 5, 5, 255]));
/// let output = reducer.reduce(&image, None).unwrap();
///
/// assert_eq!(output.details.len(), 1);
/// assert_eq!(output.details[0].mapped_name(), "ffff0000");
/// ```
#[derive(Debug, Clone)]
pub struct ColorReducer {
    book: ColorBook,
    thresholds: Thresholds,
    tile_count: u32,
    quantize_colors: usize,
}

impl ColorReducer {
    /// Create a reducer for `book` with default thresholds, a 4×4 tile grid
    /// and a 24-color quantization budget.
    pub fn new(book: ColorBook) -> Self {
        Self {
            book,
            thresholds: Thresholds::default(),
            tile_count: DEFAULT_TILE_COUNT,
            quantize_colors: DEFAULT_QUANTIZE_COLORS,
        }
    }

    /// Set the similarity thresholds.
    #[inline]
    pub fn thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Set tiles per side. 1 selects the whole-image strategy.
    #[inline]
    pub fn tile_count(mut self, tile_count: u32) -> Self {
        self.tile_count = tile_count.max(1);
        self
    }

    /// Set the quantization budget.
    #[inline]
    pub fn quantize_colors(mut self, colors: usize) -> Self {
        self.quantize_colors = colors.max(1);
        self
    }

    /// The color book output is mapped onto.
    pub fn book(&self) -> &ColorBook {
        &self.book
    }

    /// Reduce `image` with random uuids.
    ///
    /// `background` is the hint from
    /// [`detect_background`](crate::detect_background), if any.
    ///
    /// # Errors
    ///
    /// [`ReduceError::EmptyImage`] for a zero-sized image.
    pub fn reduce(&self, image: &RgbaImage, background: Option<&ColorDetail>) -> Result<ReductionOutput, ReduceError> {
        let total_colors = count_distinct_colors(image);
        self.reduce_with(image, background, total_colors, &mut RandomIds)
    }

    /// Reduce `image` with an explicit distinct-color count and uuid source.
    pub fn reduce_with(
        &self,
        image: &RgbaImage,
        background: Option<&ColorDetail>,
        total_colors: usize,
        ids: &mut dyn IdSource,
    ) -> Result<ReductionOutput, ReduceError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(ReduceError::EmptyImage);
        }

        let mut quantized = image.clone();
        quantize(&mut quantized, self.quantize_colors);
        let sorted = histogram(&quantized);

        let tile_count = if total_colors >= LARGE_IMAGE_COLORS {
            1
        } else {
            self.tile_count
        };

        let background = background.map(|bg| map_background(bg, &self.book));
        let ctx = StrategyContext {
            book: &self.book,
            thresholds: &self.thresholds,
            background: background.as_ref(),
        };

        let result = if tile_count != 1 {
            tracing::debug!(tile_count, total_colors, "using tiled strategy");
            tiled(&ctx, &quantized, tile_count, &sorted, ids)
        } else {
            tracing::debug!(total_colors, "using whole-image strategy");
            whole_image(&ctx, &sorted, ids)
        };

        tracing::debug!(
            histogram = sorted.len(),
            details = result.details.len(),
            "reduction finished"
        );

        Ok(ReductionOutput {
            details: result.details,
            similar: result.similar,
            histogram_colors: sorted.len(),
            histogram: sorted.iter().map(|e| e.color).collect(),
            background,
        })
    }
}
