//! Per-category candidate selection and final ranking.

use tracing::{debug, info};

use chatlight_models::{CandidateWindow, Clip, EmotionCategory, HighlightSet, ScoredComment};

use crate::aggregate::aggregate_comments;
use crate::config::HighlightConfig;
use crate::error::{HighlightError, HighlightResult};
use crate::merge::{merge_timewise, ClipBuilder};
use crate::refine::refine_subclip;
use crate::series::SecondSeries;
use crate::smooth::smooth_bins;
use crate::window::{extract_top_windows, WindowBounds};

/// Run the full highlight pipeline over a scored chat log.
///
/// Aggregates comments into bins, smooths each category's series, then runs
/// the three per-category pipelines independently: candidate extraction,
/// lead-in/out expansion, greedy merge, refinement of overlong clips, top-N
/// selection with backfill. The combined list is ordered by fixed category
/// priority (laugh, healing, chaos), then descending category score, then
/// ascending start time, and ranked 1-based.
///
/// Failure is per-run: any error aborts the whole request and the caller
/// must treat the result as empty. A silent category merely contributes zero
/// clips.
pub fn generate_highlights(
    comments: &[ScoredComment],
    total_duration_secs: f64,
    config: &HighlightConfig,
) -> HighlightResult<HighlightSet> {
    config.validate()?;
    if !total_duration_secs.is_finite() || total_duration_secs < 0.0 {
        return Err(HighlightError::InvalidDuration(total_duration_secs));
    }

    let mut bins = aggregate_comments(comments, total_duration_secs, config.bin_width_secs)?;
    smooth_bins(&mut bins, config.smoothing_window_bins);

    let min_start = config.min_start_secs();
    let max_end = config.max_end_secs(total_duration_secs);
    let bounds = WindowBounds::new(Some(min_start), Some(max_end));

    // Each category runs on its own candidate list and accumulator state;
    // nothing is shared across the three pipelines.
    let mut combined = Vec::new();
    for category in EmotionCategory::ALL {
        let windows = extract_top_windows(
            &bins,
            category,
            config.candidate_window_bins,
            config.top_windows,
            bounds,
        );
        let series = SecondSeries::from_bins(&bins, category);
        let clips = select_category(&windows, category, &series, min_start, max_end, config);
        info!(
            category = %category,
            candidates = windows.len(),
            clips = clips.len(),
            "selected category clips"
        );
        combined.extend(clips);
    }

    combined.sort_by(|a, b| {
        a.main_label
            .priority()
            .cmp(&b.main_label.priority())
            .then_with(|| {
                b.main_score()
                    .partial_cmp(&a.main_score())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .then_with(|| {
                a.start_secs
                    .partial_cmp(&b.start_secs)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    });

    Ok(HighlightSet::from_ordered(combined))
}

/// Promote raw candidate windows to clip accumulators by applying lead-in
/// and lead-out padding, clamped to the allowed range.
///
/// Candidates that collapse to an empty interval after clamping are silently
/// dropped.
fn expand_candidates(
    windows: &[CandidateWindow],
    label: EmotionCategory,
    min_start: f64,
    max_end: f64,
    config: &HighlightConfig,
) -> Vec<ClipBuilder> {
    windows
        .iter()
        .filter_map(|window| {
            let start = (window.start_secs - config.lead_in_secs)
                .max(min_start)
                .max(0.0);
            let end = (window.end_secs + config.lead_out_secs).min(max_end);
            if start >= end {
                return None;
            }
            Some(ClipBuilder::new(start, end, label, window.score))
        })
        .collect()
}

/// Select one category's final clips: merge, refine, rank, backfill.
fn select_category(
    windows: &[CandidateWindow],
    label: EmotionCategory,
    series: &SecondSeries,
    min_start: f64,
    max_end: f64,
    config: &HighlightConfig,
) -> Vec<Clip> {
    if windows.is_empty() {
        return Vec::new();
    }

    let mut builders = expand_candidates(windows, label, min_start, max_end, config);
    builders.sort_by(|a, b| {
        b.score(label)
            .partial_cmp(&a.score(label))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let merged = merge_timewise(builders, label);

    let mut selected: Vec<Clip> = merged
        .into_iter()
        .map(|clip| {
            if clip.duration_secs > config.max_clip_secs {
                refine_subclip(
                    clip,
                    series,
                    config.subclip_length_secs,
                    config.subclip_smooth_secs,
                )
            } else {
                clip
            }
        })
        .collect();

    selected.sort_by(|a, b| {
        b.scores
            .get(label)
            .partial_cmp(&a.scores.get(label))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    selected.truncate(config.per_category_quota);

    // Heavy overlap can collapse many raw windows into very few merged
    // clips; top up from the unmerged expanded candidates.
    if selected.len() < config.per_category_quota {
        let mut backfill = expand_candidates(windows, label, min_start, max_end, config);
        backfill.sort_by(|a, b| {
            b.score(label)
                .partial_cmp(&a.score(label))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        for builder in backfill {
            if selected.len() >= config.per_category_quota {
                break;
            }
            let clip = builder.finalize_single(label);
            if selected.iter().any(|s| s.same_slot(&clip)) {
                continue;
            }
            selected.push(clip);
        }
        debug!(
            category = %label,
            clips = selected.len(),
            quota = config.per_category_quota,
            "backfilled category from unmerged candidates"
        );
    }

    selected
}
