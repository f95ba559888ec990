//! Similarity cutoffs for the reduction pipeline.

use serde::{Deserialize, Serialize};

/// One set of similarity cutoffs.
///
/// The metrics engine uses them as strict upper bounds (`<`) when building
/// neighbor lists; the resolver uses them inclusively (`<=`) when deciding
/// collapses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cuts {
    /// Delta-E cutoff (rounded D65 CIE76)
    pub delta_e: f32,
    /// Hue distance cutoff in degrees
    pub hue: f32,
    /// RGB Euclidean distance cutoff
    pub rgb: f32,
    /// Percentage gap allowed for hue neighbors
    pub percentage: f32,
}

impl Cuts {
    /// Create a cut set.
    #[inline]
    pub const fn new(delta_e: f32, hue: f32, rgb: f32, percentage: f32) -> Self {
        Self {
            delta_e,
            hue,
            rgb,
            percentage,
        }
    }
}

/// The two cut sets the pipeline is configured with.
///
/// Which set feeds which stage depends on the strategy:
///
/// | Strategy     | Metrics                          | Resolver                        |
/// |--------------|----------------------------------|---------------------------------|
/// | whole image  | `cut`                            | `pass_sd`                       |
/// | tiled        | `cut` with `pass_sd.delta_e`     | `cut`                           |
///
/// # Defaults
///
/// - `cut`: Delta-E 10, hue 5, RGB 30, percentage 1
/// - `pass_sd`: Delta-E 8, hue 3, RGB 25, percentage 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// General cutoffs
    #[serde(default = "default_cut")]
    pub cut: Cuts,
    /// Cutoffs applied between colors that passed the std-dev filter
    #[serde(default = "default_pass_sd")]
    pub pass_sd: Cuts,
}

fn default_cut() -> Cuts {
    Cuts::new(10.0, 5.0, 30.0, 1.0)
}

fn default_pass_sd() -> Cuts {
    Cuts::new(8.0, 3.0, 25.0, 1.0)
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            cut: default_cut(),
            pass_sd: default_pass_sd(),
        }
    }
}

impl Thresholds {
    /// Cuts for metrics in the tiled strategy.
    pub(crate) fn tiled_metrics(&self) -> Cuts {
        Cuts {
            delta_e: self.pass_sd.delta_e,
            ..self.cut
        }
    }
}
