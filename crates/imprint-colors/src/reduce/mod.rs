//! Histogram-to-palette reduction.
//!
//! The stages run in this order:
//!
//! 1. [`filter_by_std_dev`]: which histogram entries are significant
//! 2. [`generate_metrics`]: pairwise distances and similar-neighbor lists
//! 3. [`resolve_collapses`] / [`apply_collapses`]: which colors fold into
//!    which
//! 4. [`map_colors`]: book mapping and uuid groups
//!
//! The whole-image and tiled strategies that drive them live in a private
//! module and are selected by [`ColorReducer`](crate::ColorReducer).

mod mapper;
mod metrics;
mod options;
mod resolver;
mod stats;
pub(crate) mod strategy;

pub use mapper::{map_background, map_colors, ArgbColor, ColorDetail, IdSource, RandomIds, SequentialIds};
pub use metrics::{
    generate_metrics, merge_parent_colors, tail_average_percentage, ColorCompareData, ComparedColor,
    SimilarColor,
};
pub use options::{Cuts, Thresholds};
pub use resolver::{apply_collapses, resolve_collapses, CollapseMap};
pub use stats::{filter_by_std_dev, standard_deviation};
