//! Standard-deviation filter over histogram counts.

use crate::histogram::HistogramEntry;

/// Population standard deviation. Empty input yields 0.
pub fn standard_deviation(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

/// Entries whose count is at least the standard deviation of all counts.
///
/// Input order is preserved.
pub fn filter_by_std_dev(entries: &[HistogramEntry]) -> Vec<HistogramEntry> {
    let counts: Vec<f64> = entries.iter().map(|e| e.count as f64).collect();
    let threshold = standard_deviation(&counts);
    tracing::debug!(
        entries = entries.len(),
        threshold,
        "std-dev filter"
    );
    entries
        .iter()
        .filter(|e| e.count as f64 >= threshold)
        .copied()
        .collect()
}
