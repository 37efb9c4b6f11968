//! Configuration for the highlight extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{HighlightError, HighlightResult};

/// Configuration for the highlight extraction pipeline.
///
/// Defaults reproduce the production tuning: 1-second full-range bins with a
/// 7-bin smoothing window, 10-bin candidate windows, and 35-second clips.
/// Note the bin width and the candidate window length are different knobs:
/// bins aggregate, windows score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightConfig {
    // === Aggregation ===
    /// Width of full-range analysis bins in seconds (default: 1.0)
    pub bin_width_secs: f64,

    // === Smoothing ===
    /// Centered moving-average window in bins (default: 7)
    pub smoothing_window_bins: usize,

    // === Candidate Extraction ===
    /// Sliding candidate window length in bins (default: 10)
    pub candidate_window_bins: usize,

    /// Top-scoring window positions kept per category (default: 100)
    pub top_windows: usize,

    // === Clip Expansion ===
    /// Seconds of lead-in added before a candidate window (default: 15.0)
    pub lead_in_secs: f64,

    /// Seconds of lead-out added after a candidate window (default: 3.0)
    pub lead_out_secs: f64,

    // === Refinement ===
    /// Merged clips longer than this many seconds are narrowed (default: 35.0)
    pub max_clip_secs: f64,

    /// Target length of a narrowed sub-clip in seconds (default: 35.0)
    pub subclip_length_secs: f64,

    /// Local smoothing window for peak detection, in seconds (default: 5)
    pub subclip_smooth_secs: usize,

    // === Selection ===
    /// Clips kept per category (default: 5)
    pub per_category_quota: usize,

    // === Exclusion Zones ===
    /// Seconds excluded from the start of the stream (default: 0.0)
    pub intro_exclusion_secs: f64,

    /// Seconds excluded from the end of the stream (default: 0.0)
    pub ending_exclusion_secs: f64,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            bin_width_secs: 1.0,
            smoothing_window_bins: 7,
            candidate_window_bins: 10,
            top_windows: 100,
            lead_in_secs: 15.0,
            lead_out_secs: 3.0,
            max_clip_secs: 35.0,
            subclip_length_secs: 35.0,
            subclip_smooth_secs: 5,
            per_category_quota: 5,
            intro_exclusion_secs: 0.0,
            ending_exclusion_secs: 0.0,
        }
    }
}

impl HighlightConfig {
    /// Create with intro/ending exclusion zones.
    pub fn with_exclusions(mut self, intro_secs: f64, ending_secs: f64) -> Self {
        self.intro_exclusion_secs = intro_secs;
        self.ending_exclusion_secs = ending_secs;
        self
    }

    /// Create with a custom aggregation bin width.
    pub fn with_bin_width(mut self, bin_width_secs: f64) -> Self {
        self.bin_width_secs = bin_width_secs;
        self
    }

    /// Create with a custom per-category quota.
    pub fn with_quota(mut self, per_category_quota: usize) -> Self {
        self.per_category_quota = per_category_quota;
        self
    }

    /// Earliest second a candidate window may start.
    pub fn min_start_secs(&self) -> f64 {
        self.intro_exclusion_secs.max(0.0)
    }

    /// Latest second a candidate window may end, for a stream of the given
    /// total duration. Never earlier than `min_start_secs`.
    pub fn max_end_secs(&self, total_duration_secs: f64) -> f64 {
        (total_duration_secs - self.ending_exclusion_secs).max(self.min_start_secs())
    }

    /// Validate parameter ranges.
    pub fn validate(&self) -> HighlightResult<()> {
        if !(self.bin_width_secs > 0.0) {
            return Err(HighlightError::invalid_config(format!(
                "bin_width_secs must be positive, got {}",
                self.bin_width_secs
            )));
        }
        if self.candidate_window_bins == 0 {
            return Err(HighlightError::invalid_config(
                "candidate_window_bins must be at least 1",
            ));
        }
        if self.smoothing_window_bins == 0 {
            return Err(HighlightError::invalid_config(
                "smoothing_window_bins must be at least 1",
            ));
        }
        if !(self.subclip_length_secs > 0.0) {
            return Err(HighlightError::invalid_config(format!(
                "subclip_length_secs must be positive, got {}",
                self.subclip_length_secs
            )));
        }
        if self.per_category_quota == 0 {
            return Err(HighlightError::invalid_config(
                "per_category_quota must be at least 1",
            ));
        }
        if self.lead_in_secs < 0.0 || self.lead_out_secs < 0.0 {
            return Err(HighlightError::invalid_config(
                "lead_in_secs and lead_out_secs must be non-negative",
            ));
        }
        if self.intro_exclusion_secs < 0.0 || self.ending_exclusion_secs < 0.0 {
            return Err(HighlightError::invalid_config(
                "exclusion zones must be non-negative",
            ));
        }
        Ok(())
    }
}
