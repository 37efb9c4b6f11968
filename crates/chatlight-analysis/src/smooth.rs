//! Centered moving-average smoothing.

use chatlight_models::{EmotionCategory, TimeBin};

/// Centered moving average with partial windows at the edges.
///
/// Each output sample averages the input over a window of `window` samples
/// centered on the same index. Near the boundaries the average runs over
/// however many in-window samples exist; the window is not zero-padded.
/// Series shorter than `window` are returned unchanged.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    if window <= 1 || n < window {
        return values.to_vec();
    }

    let left = (window - 1) / 2;
    let right = window / 2;

    (0..n)
        .map(|i| {
            let lo = i.saturating_sub(left);
            let hi = (i + right + 1).min(n);
            let slice = &values[lo..hi];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}

/// Fill each bin's smoothed sums with the centered moving average of its
/// category sums, independently per category.
///
/// When the series is shorter than the window the smoothed sums are a copy of
/// the raw sums.
pub fn smooth_bins(bins: &mut [TimeBin], window: usize) {
    for category in EmotionCategory::ALL {
        let raw: Vec<f64> = bins.iter().map(|b| b.scores.get(category)).collect();
        let smoothed = moving_average(&raw, window);
        for (bin, value) in bins.iter_mut().zip(smoothed) {
            bin.smoothed.set(category, value);
        }
    }
}
