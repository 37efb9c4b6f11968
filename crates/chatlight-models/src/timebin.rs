//! Fixed-width time-bin aggregates.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::category::CategoryScores;

/// One fixed-width time bucket of aggregated comment scores.
///
/// Bins are contiguous and cover `[0, total_duration)`. A bin is filled once
/// during aggregation, gains its `smoothed` sums once during smoothing, and
/// is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TimeBin {
    /// Inclusive start of the bucket in seconds.
    pub start_secs: f64,

    /// Exclusive end of the bucket in seconds.
    pub end_secs: f64,

    /// Number of comments whose timestamp falls in `[start, end)`.
    pub comment_count: u32,

    /// Sum of per-category scores over comments in `[start, end)`.
    pub scores: CategoryScores,

    /// Sum of positive-sentiment scores over comments in `[start, end)`.
    pub positive_sum: f64,

    /// Centered moving average of `scores` over neighboring bins. Equals
    /// `scores` until smoothing runs (or when the series is too short to
    /// smooth).
    pub smoothed: CategoryScores,
}

impl TimeBin {
    /// Create an empty bucket for `[start_secs, end_secs)`.
    pub fn empty(start_secs: f64, end_secs: f64) -> Self {
        Self {
            start_secs,
            end_secs,
            comment_count: 0,
            scores: CategoryScores::default(),
            positive_sum: 0.0,
            smoothed: CategoryScores::default(),
        }
    }

    /// Width of the bucket in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.end_secs - self.start_secs
    }

    /// Whether a timestamp falls inside `[start, end)`.
    pub fn contains(&self, timestamp_secs: f64) -> bool {
        timestamp_secs >= self.start_secs && timestamp_secs < self.end_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_half_open() {
        let bin = TimeBin::empty(10.0, 20.0);
        assert!(bin.contains(10.0));
        assert!(bin.contains(19.999));
        assert!(!bin.contains(20.0));
        assert!(!bin.contains(9.999));
    }

    #[test]
    fn test_duration() {
        let bin = TimeBin::empty(30.0, 40.0);
        assert_eq!(bin.duration_secs(), 10.0);
    }
}
