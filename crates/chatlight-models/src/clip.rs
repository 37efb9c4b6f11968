//! Candidate windows, finalized clips, and ranked results.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::category::{CategoryScores, EmotionCategory};

/// A scored sliding-window position.
///
/// Ephemeral: produced and consumed during candidate extraction, then either
/// discarded or promoted into a clip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateWindow {
    /// Window start in seconds.
    pub start_secs: f64,
    /// Window end in seconds.
    pub end_secs: f64,
    /// Sum of smoothed per-bin scores inside `[start, end)`.
    pub score: f64,
}

impl CandidateWindow {
    pub fn new(start_secs: f64, end_secs: f64, score: f64) -> Self {
        Self {
            start_secs,
            end_secs,
            score,
        }
    }
}

/// A finalized highlight clip.
///
/// Immutable once emitted; boundary changes go through [`Clip::with_bounds`]
/// so the duration can never drift from `end - start`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Clip {
    /// Clip start in seconds.
    pub start_secs: f64,

    /// Clip end in seconds.
    pub end_secs: f64,

    /// Always `end_secs - start_secs`.
    pub duration_secs: f64,

    /// Every category that contributed a merged window.
    pub labels: Vec<EmotionCategory>,

    /// The category this clip was selected for.
    pub main_label: EmotionCategory,

    /// Per-category scores, always fully populated. A merged label's score is
    /// the maximum over all absorbed windows, never their sum.
    pub scores: CategoryScores,

    /// Score of the raw candidate window this clip grew from.
    pub window_score: f64,

    /// Refinement audit record, present once the refiner has seen the clip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refinement: Option<SubclipDebug>,
}

impl Clip {
    /// Create a clip for a single category.
    pub fn new(
        start_secs: f64,
        end_secs: f64,
        main_label: EmotionCategory,
        scores: CategoryScores,
        window_score: f64,
    ) -> Self {
        Self {
            start_secs,
            end_secs,
            duration_secs: end_secs - start_secs,
            labels: vec![main_label],
            main_label,
            scores,
            window_score,
            refinement: None,
        }
    }

    /// Return a copy with new boundaries and a recomputed duration.
    pub fn with_bounds(mut self, start_secs: f64, end_secs: f64) -> Self {
        self.start_secs = start_secs;
        self.end_secs = end_secs;
        self.duration_secs = end_secs - start_secs;
        self
    }

    /// Score of the clip's main category.
    pub fn main_score(&self) -> f64 {
        self.scores.get(self.main_label)
    }

    /// Whether two clips cover the same interval for the same category.
    ///
    /// This is the only stable identity a clip has before ranks are
    /// assigned; selection uses it to keep backfill duplicate-free.
    pub fn same_slot(&self, other: &Clip) -> bool {
        self.main_label == other.main_label
            && self.start_secs == other.start_secs
            && self.end_secs == other.end_secs
    }
}

/// Why the refiner did or did not adjust a clip's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RefineReason {
    /// The clip exceeded the target length and was narrowed to a sub-window.
    Refined,
    /// The clip was already at or under the target length.
    NoCut,
}

/// One candidate sub-window considered during refinement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SubclipWindow {
    /// Candidate start in seconds.
    pub start_secs: f64,
    /// Candidate end in seconds.
    pub end_secs: f64,
    /// Sum of smoothed values inside the window.
    pub sum: f64,
    /// Maximum smoothed value inside the window.
    pub max: f64,
    /// Composite score: `sum + 0.5 * max + 0.1 * count(values == max)`.
    pub score: f64,
}

/// Auditable record of one refinement decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SubclipDebug {
    /// Why the clip was (not) narrowed.
    pub reason: RefineReason,

    /// Clip start before refinement.
    pub original_start_secs: f64,

    /// Clip end before refinement.
    pub original_end_secs: f64,

    /// Absolute time of the winning peak, when a cut was made.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_peak_secs: Option<f64>,

    /// Composite score of the winning window, when a cut was made.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_score: Option<f64>,

    /// Every candidate window that was scored, in peak scan order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<SubclipWindow>,
}

impl SubclipDebug {
    /// Record for a clip that was already short enough.
    pub fn no_cut(original_start_secs: f64, original_end_secs: f64) -> Self {
        Self {
            reason: RefineReason::NoCut,
            original_start_secs,
            original_end_secs,
            best_peak_secs: None,
            best_score: None,
            candidates: Vec::new(),
        }
    }
}

/// A clip with its 1-based position in the final combined ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RankedClip {
    /// 1-based rank over the whole combined list.
    pub rank: u32,

    #[serde(flatten)]
    pub clip: Clip,
}

/// The combined result of one highlight run.
///
/// Clips are ordered by fixed category priority (laugh, healing, chaos),
/// then descending main-category score, then ascending start time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HighlightSet {
    /// All ranked clips in final order.
    pub clips: Vec<RankedClip>,
}

impl HighlightSet {
    /// Wrap an already-ordered clip list, assigning 1-based ranks.
    pub fn from_ordered(clips: Vec<Clip>) -> Self {
        Self {
            clips: clips
                .into_iter()
                .enumerate()
                .map(|(i, clip)| RankedClip {
                    rank: i as u32 + 1,
                    clip,
                })
                .collect(),
        }
    }

    /// Clips selected for one category, in final order.
    pub fn for_category(&self, category: EmotionCategory) -> Vec<&RankedClip> {
        self.clips
            .iter()
            .filter(|ranked| ranked.clip.main_label == category)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }
}
