//! Overall-excitement period detection.
//!
//! A second analysis path alongside the per-category pipelines: instead of a
//! single emotion channel it scores the whole chat, combining normalized
//! comment volume with normalized positive sentiment. Periods are seeded
//! from the hottest bins, merged with a gap tolerance, and bounded in
//! duration by re-centering on the best-scoring moment.
//!
//! The gap tolerance is specific to this path. The per-category merger
//! (`merge_timewise`) deliberately has none.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use chatlight_models::{ExcitementPeriod, ScoredComment};

use crate::aggregate::aggregate_comments;
use crate::error::{HighlightError, HighlightResult};

/// Configuration for excitement-period detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExcitementConfig {
    // === Aggregation ===
    /// Bin width for excitement analysis in seconds (default: 10.0).
    /// Coarser than the per-category full-range bins.
    pub bin_width_secs: f64,

    // === Scoring ===
    /// Weight of normalized comment count in the composite score (default: 0.6)
    pub count_weight: f64,

    /// Weight of normalized positive sentiment (default: 0.4)
    pub positive_weight: f64,

    /// Bins must score strictly above this to seed a period (default: 0.0)
    pub threshold: f64,

    /// Hottest bins considered as seeds (default: 40)
    pub top_bins: usize,

    // === Period Shaping ===
    /// Seconds of lead-in before a seeded bin (default: 15.0)
    pub lead_in_secs: f64,

    /// Seconds of trail-out after a seeded bin (default: 5.0)
    pub trail_out_secs: f64,

    /// Gap tolerance when merging periods (default: 10.0)
    pub merge_margin_secs: f64,

    /// Merged periods shorter than this are discarded (default: 5.0)
    pub min_duration_secs: f64,

    /// Merged periods longer than this are re-centered on their best moment
    /// and clamped (default: 60.0)
    pub max_duration_secs: f64,

    // === Selection ===
    /// Ranked periods returned (default: 10)
    pub max_periods: usize,

    // === Exclusion Zones ===
    /// Seconds excluded from the start of the stream (default: 0.0)
    pub intro_exclusion_secs: f64,

    /// Seconds excluded from the end of the stream (default: 0.0)
    pub ending_exclusion_secs: f64,
}

impl Default for ExcitementConfig {
    fn default() -> Self {
        Self {
            bin_width_secs: 10.0,
            count_weight: 0.6,
            positive_weight: 0.4,
            threshold: 0.0,
            top_bins: 40,
            lead_in_secs: 15.0,
            trail_out_secs: 5.0,
            merge_margin_secs: 10.0,
            min_duration_secs: 5.0,
            max_duration_secs: 60.0,
            max_periods: 10,
            intro_exclusion_secs: 0.0,
            ending_exclusion_secs: 0.0,
        }
    }
}

impl ExcitementConfig {
    /// Create with intro/ending exclusion zones.
    pub fn with_exclusions(mut self, intro_secs: f64, ending_secs: f64) -> Self {
        self.intro_exclusion_secs = intro_secs;
        self.ending_exclusion_secs = ending_secs;
        self
    }

    fn validate(&self) -> HighlightResult<()> {
        if !(self.bin_width_secs > 0.0) {
            return Err(HighlightError::invalid_config(format!(
                "bin_width_secs must be positive, got {}",
                self.bin_width_secs
            )));
        }
        if self.max_duration_secs < self.min_duration_secs {
            return Err(HighlightError::invalid_config(
                "max_duration_secs must be at least min_duration_secs",
            ));
        }
        if self.count_weight < 0.0 || self.positive_weight < 0.0 {
            return Err(HighlightError::invalid_config(
                "score weights must be non-negative",
            ));
        }
        Ok(())
    }
}

/// Running accumulator for the gap-tolerant period merge.
struct PeriodAcc {
    start_secs: f64,
    end_secs: f64,
    max_score: f64,
    best_score_time_secs: f64,
}

/// Detect the top overall-excitement periods in a scored chat log.
///
/// Per-bin comment counts and positive sums are normalized against the
/// clip-eligible range (intro/ending excluded) and combined into a composite
/// score. The hottest bins seed periods with lead-in/trail-out padding,
/// which are merged whenever the gap between them is within the margin and
/// finally bounded in duration. Returns at most `max_periods`, ranked by
/// score.
pub fn detect_excitement_periods(
    comments: &[ScoredComment],
    total_duration_secs: f64,
    config: &ExcitementConfig,
) -> HighlightResult<Vec<ExcitementPeriod>> {
    config.validate()?;

    let bins = aggregate_comments(comments, total_duration_secs, config.bin_width_secs)?;

    let min_start = config.intro_exclusion_secs.max(0.0);
    let max_end = (total_duration_secs - config.ending_exclusion_secs).max(min_start);

    // Normalize against the clip-eligible range only, so a packed intro
    // cannot flatten every in-range score.
    let mut count_max = 0u32;
    let mut positive_max = 0.0f64;
    for bin in &bins {
        if bin.start_secs >= min_start && bin.end_secs <= max_end {
            count_max = count_max.max(bin.comment_count);
            positive_max = positive_max.max(bin.positive_sum);
        }
    }

    let scores: Vec<f64> = bins
        .iter()
        .map(|bin| {
            let norm_count = if count_max > 0 {
                bin.comment_count as f64 / count_max as f64
            } else {
                0.0
            };
            let norm_positive = if positive_max > 0.0 {
                bin.positive_sum / positive_max
            } else {
                0.0
            };
            config.count_weight * norm_count + config.positive_weight * norm_positive
        })
        .collect();

    // Seed periods from the hottest eligible bins.
    let mut hottest: Vec<usize> = (0..bins.len())
        .filter(|&i| bins[i].start_secs >= min_start && bins[i].end_secs <= max_end)
        .collect();
    hottest.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    hottest.truncate(config.top_bins);

    let mut seeds = Vec::new();
    for &i in &hottest {
        if !(scores[i] > config.threshold) {
            continue;
        }
        let bin = &bins[i];
        let start = (bin.start_secs - config.lead_in_secs).max(min_start);
        let mut end = bin.end_secs + config.trail_out_secs;
        if start >= end {
            continue;
        }
        if end > max_end {
            end = max_end;
            if start >= end {
                continue;
            }
        }
        seeds.push(PeriodAcc {
            start_secs: start,
            end_secs: end,
            max_score: scores[i],
            best_score_time_secs: bin.start_secs,
        });
    }

    debug!(
        bins = bins.len(),
        seeds = seeds.len(),
        "seeded excitement periods"
    );

    // Gap-tolerant merge, left to right.
    seeds.sort_by(|a, b| {
        a.start_secs
            .partial_cmp(&b.start_secs)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut merged: Vec<PeriodAcc> = Vec::new();
    let mut current: Option<PeriodAcc> = None;
    for seed in seeds {
        match current.as_mut() {
            Some(acc) if seed.start_secs <= acc.end_secs + config.merge_margin_secs => {
                acc.end_secs = acc.end_secs.max(seed.end_secs);
                if seed.max_score > acc.max_score {
                    acc.max_score = seed.max_score;
                    acc.best_score_time_secs = seed.best_score_time_secs;
                }
            }
            _ => {
                if let Some(acc) = current.take() {
                    merged.push(acc);
                }
                current = Some(seed);
            }
        }
    }
    if let Some(acc) = current {
        merged.push(acc);
    }

    // Duration bounds: discard shorts, re-center overlong periods on their
    // best-scoring moment without leaving the merged interval.
    let mut periods: Vec<PeriodAcc> = merged
        .into_iter()
        .filter(|p| p.end_secs - p.start_secs >= config.min_duration_secs)
        .map(|mut p| {
            let duration = p.end_secs - p.start_secs;
            if duration > config.max_duration_secs {
                let center = p.best_score_time_secs;
                let mut new_start = center - config.max_duration_secs / 2.0;
                let mut new_end = center + config.max_duration_secs / 2.0;
                if new_start < p.start_secs {
                    new_start = p.start_secs;
                    new_end = new_start + config.max_duration_secs;
                } else if new_end > p.end_secs {
                    new_end = p.end_secs;
                    new_start = new_end - config.max_duration_secs;
                }
                p.start_secs = new_start;
                p.end_secs = new_end;
            }
            p
        })
        .collect();

    periods.sort_by(|a, b| {
        b.max_score
            .partial_cmp(&a.max_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    periods.truncate(config.max_periods);

    let ranked: Vec<ExcitementPeriod> = periods
        .into_iter()
        .enumerate()
        .map(|(i, p)| ExcitementPeriod {
            start_secs: p.start_secs,
            end_secs: p.end_secs,
            max_score: p.max_score,
            best_score_time_secs: p.best_score_time_secs,
            rank: i as u32 + 1,
        })
        .collect();

    info!(periods = ranked.len(), "detected excitement periods");

    Ok(ranked)
}
