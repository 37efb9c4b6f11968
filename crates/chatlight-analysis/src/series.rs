//! Per-second score series access.

use chatlight_models::{EmotionCategory, TimeBin};

/// A per-second view over one category's smoothed bin sums.
///
/// A category with no data produces an all-zero (or empty) series rather
/// than a structural gap, so callers never branch on whether the category
/// is present. Smoothed sums are used once smoothing has run; before that
/// they equal the raw sums.
#[derive(Debug, Clone)]
pub struct SecondSeries {
    values: Vec<f64>,
    bin_width_secs: f64,
}

impl SecondSeries {
    /// Build the series for one category from aggregated bins.
    pub fn from_bins(bins: &[TimeBin], category: EmotionCategory) -> Self {
        let bin_width_secs = bins
            .first()
            .map(|b| b.duration_secs())
            .filter(|w| *w > 0.0)
            .unwrap_or(1.0);
        Self {
            values: bins.iter().map(|b| b.smoothed.get(category)).collect(),
            bin_width_secs,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Score at an absolute second, zero outside the covered range.
    pub fn value_at(&self, second: i64) -> f64 {
        if second < 0 {
            return 0.0;
        }
        let index = (second as f64 / self.bin_width_secs).floor() as usize;
        self.values.get(index).copied().unwrap_or(0.0)
    }

    /// One sample per whole second over `[start_secs, end_secs)`.
    pub fn slice_seconds(&self, start_secs: f64, end_secs: f64) -> Vec<f64> {
        let start = start_secs.floor() as i64;
        let end = end_secs.floor() as i64;
        if end <= start {
            return Vec::new();
        }
        (start..end).map(|s| self.value_at(s)).collect()
    }
}
