//! Sliding-window candidate extraction.

use tracing::debug;

use chatlight_models::{CandidateWindow, EmotionCategory, TimeBin};

/// Bounds restricting where candidate windows may lie.
///
/// Used to keep candidates out of intro/ending exclusion zones or inside an
/// allowed sub-range. `None` leaves that side unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WindowBounds {
    /// Windows starting before this second are excluded.
    pub min_start_secs: Option<f64>,
    /// Windows ending after this second are excluded.
    pub max_end_secs: Option<f64>,
}

impl WindowBounds {
    pub fn new(min_start_secs: Option<f64>, max_end_secs: Option<f64>) -> Self {
        Self {
            min_start_secs,
            max_end_secs,
        }
    }

    /// Whether a window at `[start, end]` satisfies both bounds.
    pub fn admits(&self, start_secs: f64, end_secs: f64) -> bool {
        if let Some(min_start) = self.min_start_secs {
            if start_secs < min_start {
                return false;
            }
        }
        if let Some(max_end) = self.max_end_secs {
            if end_secs > max_end {
                return false;
            }
        }
        true
    }
}

/// Slide a fixed-length window across the smoothed series and keep the
/// top-N highest-scoring positions.
///
/// The window advances one bin at a time; a position's score is the sum of
/// the category's smoothed values over its `window_bins` bins. Positions
/// violating `bounds` are excluded, as are positions with no signal at all
/// (score of zero), so a silent category yields an empty candidate list.
/// The result is sorted score-descending with stable ties (original scan
/// order).
pub fn extract_top_windows(
    bins: &[TimeBin],
    category: EmotionCategory,
    window_bins: usize,
    top_n: usize,
    bounds: WindowBounds,
) -> Vec<CandidateWindow> {
    if window_bins == 0 || top_n == 0 || bins.len() < window_bins {
        return Vec::new();
    }

    let values: Vec<f64> = bins.iter().map(|b| b.smoothed.get(category)).collect();

    let mut windows = Vec::new();
    for i in 0..=(bins.len() - window_bins) {
        let start = bins[i].start_secs;
        let end = bins[i + window_bins - 1].end_secs;
        if !bounds.admits(start, end) {
            continue;
        }
        let score: f64 = values[i..i + window_bins].iter().sum();
        if score <= 0.0 {
            continue;
        }
        windows.push(CandidateWindow::new(start, end, score));
    }

    // Stable sort keeps scan order on equal scores.
    windows.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    windows.truncate(top_n);

    debug!(
        category = %category,
        candidates = windows.len(),
        window_bins = window_bins,
        "extracted top candidate windows"
    );

    windows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatlight_models::CategoryScores;

    /// One-second bins with the given smoothed laugh values.
    fn make_bins(values: &[f64]) -> Vec<TimeBin> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let mut bin = TimeBin::empty(i as f64, (i + 1) as f64);
                bin.smoothed = CategoryScores::single(EmotionCategory::Laugh, v);
                bin
            })
            .collect()
    }

    #[test]
    fn test_scores_are_window_sums() {
        let bins = make_bins(&[1.0, 2.0, 3.0, 4.0]);
        let windows = extract_top_windows(
            &bins,
            EmotionCategory::Laugh,
            2,
            10,
            WindowBounds::default(),
        );
        // Best window is the last pair (3 + 4).
        assert_eq!(windows[0].start_secs, 2.0);
        assert_eq!(windows[0].end_secs, 4.0);
        assert_eq!(windows[0].score, 7.0);
        assert_eq!(windows.len(), 3);
    }

    #[test]
    fn test_sorted_descending_with_stable_ties() {
        let bins = make_bins(&[2.0, 0.0, 2.0, 0.0, 2.0, 0.0]);
        let windows = extract_top_windows(
            &bins,
            EmotionCategory::Laugh,
            2,
            10,
            WindowBounds::default(),
        );
        for pair in windows.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        // Equal-scoring windows keep scan order.
        let equal: Vec<f64> = windows
            .iter()
            .filter(|w| w.score == 2.0)
            .map(|w| w.start_secs)
            .collect();
        let mut sorted = equal.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(equal, sorted);
    }

    #[test]
    fn test_bounds_exclude_windows() {
        let bins = make_bins(&[1.0; 20]);
        let bounds = WindowBounds::new(Some(5.0), Some(15.0));
        let windows =
            extract_top_windows(&bins, EmotionCategory::Laugh, 10, 100, bounds);
        for w in &windows {
            assert!(w.start_secs >= 5.0, "window starts at {}", w.start_secs);
            assert!(w.end_secs <= 15.0, "window ends at {}", w.end_secs);
        }
        assert_eq!(windows.len(), 1);
    }

    #[test]
    fn test_silent_series_yields_no_candidates() {
        let bins = make_bins(&[0.0; 60]);
        let windows = extract_top_windows(
            &bins,
            EmotionCategory::Laugh,
            10,
            100,
            WindowBounds::default(),
        );
        assert!(windows.is_empty());
    }

    #[test]
    fn test_series_shorter_than_window_yields_nothing() {
        let bins = make_bins(&[1.0; 5]);
        let windows = extract_top_windows(
            &bins,
            EmotionCategory::Laugh,
            10,
            100,
            WindowBounds::default(),
        );
        assert!(windows.is_empty());
    }

    #[test]
    fn test_top_n_truncates() {
        let bins = make_bins(&[1.0; 30]);
        let windows = extract_top_windows(
            &bins,
            EmotionCategory::Laugh,
            10,
            3,
            WindowBounds::default(),
        );
        assert_eq!(windows.len(), 3);
    }
}
