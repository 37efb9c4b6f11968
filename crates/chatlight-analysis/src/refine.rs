//! Peak-driven sub-window refinement of overlong clips.

use tracing::debug;

use chatlight_models::{Clip, RefineReason, SubclipDebug, SubclipWindow};

use crate::peaks::{argmax, find_peaks};
use crate::series::SecondSeries;
use crate::smooth::moving_average;

/// Narrow an overlong clip to its best fixed-length sub-window.
///
/// The clip's score series is sliced to `[start, end)`, lightly smoothed to
/// suppress second-to-second noise, and scanned for local maxima (falling
/// back to the global maximum when the slice is monotonic). Each peak seeds
/// a candidate window of exactly `target_secs` seconds centered on it, then
/// shifted as needed so it never leaves the original bounds. Candidates are
/// scored `sum + 0.5 * max + 0.1 * count(values == max)`, where the last two
/// terms prefer a strong, sustained peak over a broad-but-flat sum; ties
/// keep the first-scanned peak.
///
/// A clip already at or under the target length is returned unchanged apart
/// from a `no_cut` audit record. The winner always lies within the original
/// `[start, end]` and carries the full candidate list for audit.
pub fn refine_subclip(
    clip: Clip,
    series: &SecondSeries,
    target_secs: f64,
    smooth_window: usize,
) -> Clip {
    let original_start = clip.start_secs;
    let original_end = clip.end_secs;
    let start = original_start.floor() as i64;
    let end = original_end.floor() as i64;
    let target = target_secs.floor().max(1.0) as i64;

    if end - start <= target {
        debug!(
            start = original_start,
            end = original_end,
            "clip already within target length, no cut"
        );
        let mut clip = clip;
        clip.refinement = Some(SubclipDebug::no_cut(original_start, original_end));
        return clip;
    }

    let local = series.slice_seconds(start as f64, end as f64);
    if local.is_empty() {
        let mut clip = clip;
        clip.refinement = Some(SubclipDebug::no_cut(original_start, original_end));
        return clip;
    }

    let smoothed = moving_average(&local, smooth_window);
    let mut peaks = find_peaks(&smoothed);
    if peaks.is_empty() {
        if let Some(index) = argmax(&smoothed) {
            peaks.push(index);
        }
    }

    // Center the candidate on the peak, then pull it back inside the clip.
    let half = (target + 1) / 2;
    let mut best_score = f64::NEG_INFINITY;
    let mut best_window = (start, start + target);
    let mut best_peak = None;
    let mut candidates = Vec::with_capacity(peaks.len());

    for peak in peaks {
        let peak_time = start + peak as i64;
        let win_start = (peak_time - half).max(start);
        let win_end = (win_start + target).min(end);
        let win_start = (win_end - target).max(start);

        let idx_start = (win_start - start) as usize;
        let idx_end = (win_end - start) as usize;
        let window = &smoothed[idx_start..idx_end];

        let sum: f64 = window.iter().sum();
        let max = window.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let at_max = window.iter().filter(|&&v| v == max).count();
        let score = sum + 0.5 * max + 0.1 * at_max as f64;

        candidates.push(SubclipWindow {
            start_secs: win_start as f64,
            end_secs: win_end as f64,
            sum,
            max,
            score,
        });

        // Strict comparison: ties keep the first-scanned peak.
        if score > best_score {
            best_score = score;
            best_window = (win_start, win_end);
            best_peak = Some(peak_time);
        }
    }

    debug!(
        original_start = original_start,
        original_end = original_end,
        refined_start = best_window.0,
        refined_end = best_window.1,
        best_peak = ?best_peak,
        "narrowed overlong clip to sub-window"
    );

    let mut refined = clip.with_bounds(best_window.0 as f64, best_window.1 as f64);
    refined.refinement = Some(SubclipDebug {
        reason: RefineReason::Refined,
        original_start_secs: original_start,
        original_end_secs: original_end,
        best_peak_secs: best_peak.map(|p| p as f64),
        best_score: Some(best_score),
        candidates,
    });
    refined
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatlight_models::{CategoryScores, EmotionCategory, TimeBin};

    /// One-second bins with the given smoothed chaos values.
    fn make_series(values: &[f64]) -> SecondSeries {
        let bins: Vec<TimeBin> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let mut bin = TimeBin::empty(i as f64, (i + 1) as f64);
                bin.smoothed = CategoryScores::single(EmotionCategory::Chaos, v);
                bin
            })
            .collect();
        SecondSeries::from_bins(&bins, EmotionCategory::Chaos)
    }

    fn make_clip(start: f64, end: f64) -> Clip {
        Clip::new(
            start,
            end,
            EmotionCategory::Chaos,
            CategoryScores::single(EmotionCategory::Chaos, 8.0),
            8.0,
        )
    }

    #[test]
    fn test_short_clip_is_untouched_but_recorded() {
        let series = make_series(&[1.0; 80]);
        let clip = make_clip(10.0, 40.0);
        let refined = refine_subclip(clip.clone(), &series, 35.0, 5);

        assert_eq!(refined.start_secs, clip.start_secs);
        assert_eq!(refined.end_secs, clip.end_secs);
        let debug = refined.refinement.unwrap();
        assert_eq!(debug.reason, RefineReason::NoCut);
        assert_eq!(debug.original_start_secs, 10.0);
    }

    #[test]
    fn test_sharp_peak_centers_window() {
        let mut values = vec![0.0; 80];
        values[40] = 10.0;
        let series = make_series(&values);

        let refined = refine_subclip(make_clip(10.0, 60.0), &series, 35.0, 1);

        assert_eq!(refined.start_secs, 22.0);
        assert_eq!(refined.end_secs, 57.0);
        assert_eq!(refined.duration_secs, 35.0);
        let debug = refined.refinement.unwrap();
        assert_eq!(debug.reason, RefineReason::Refined);
        assert_eq!(debug.best_peak_secs, Some(40.0));
    }

    #[test]
    fn test_result_stays_inside_original_bounds() {
        // Peak near the right edge forces the window to shift left.
        let mut values = vec![0.0; 80];
        values[58] = 10.0;
        let series = make_series(&values);

        let refined = refine_subclip(make_clip(10.0, 60.0), &series, 35.0, 1);

        assert!(refined.start_secs >= 10.0);
        assert!(refined.end_secs <= 60.0);
        assert_eq!(refined.duration_secs, 35.0);
        assert!(refined.start_secs <= 58.0 && 58.0 <= refined.end_secs);
    }

    #[test]
    fn test_monotonic_slice_falls_back_to_global_max() {
        let values: Vec<f64> = (0..80).map(|i| i as f64).collect();
        let series = make_series(&values);

        let refined = refine_subclip(make_clip(0.0, 60.0), &series, 35.0, 1);

        // Global max of the slice is its last sample; window hugs the end.
        assert_eq!(refined.end_secs, 60.0);
        assert_eq!(refined.duration_secs, 35.0);
    }

    #[test]
    fn test_strongest_peak_wins_over_earlier_weak_peak() {
        let mut values = vec![0.0; 120];
        values[20] = 3.0;
        values[90] = 9.0;
        let series = make_series(&values);

        let refined = refine_subclip(make_clip(0.0, 120.0), &series, 35.0, 1);

        assert!(
            refined.start_secs <= 90.0 && 90.0 <= refined.end_secs,
            "winning window {}..{} should contain the strong peak",
            refined.start_secs,
            refined.end_secs
        );
        let debug = refined.refinement.unwrap();
        assert_eq!(debug.candidates.len(), 2);
        assert_eq!(debug.best_peak_secs, Some(90.0));
    }

    #[test]
    fn test_scores_and_labels_survive_refinement() {
        let mut values = vec![0.0; 80];
        values[40] = 10.0;
        let series = make_series(&values);

        let refined = refine_subclip(make_clip(10.0, 60.0), &series, 35.0, 5);

        assert_eq!(refined.scores.get(EmotionCategory::Chaos), 8.0);
        assert_eq!(refined.main_label, EmotionCategory::Chaos);
    }
}
