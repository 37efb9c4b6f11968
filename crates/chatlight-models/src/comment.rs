//! Scored chat comment input records.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::category::CategoryScores;

/// A chat comment that was sentiment-scored upstream.
///
/// Timestamps are seconds relative to stream start and may be negative for
/// pre-stream chat. Scores default to zero when the upstream scorer emitted
/// nothing for a category.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScoredComment {
    /// Seconds from stream start; negative for pre-stream chat.
    pub timestamp_secs: f64,

    /// Per-category sentiment scores (non-negative).
    #[serde(default)]
    pub scores: CategoryScores,

    /// Overall positive-sentiment score, used by excitement analysis.
    #[serde(default)]
    pub positive_score: f64,

    /// Raw comment text. Unused by the analysis core; carried for downstream
    /// display.
    #[serde(default)]
    pub text: String,
}

impl ScoredComment {
    /// Create a comment with the given scores and no text.
    pub fn new(timestamp_secs: f64, scores: CategoryScores) -> Self {
        Self {
            timestamp_secs,
            scores,
            positive_score: 0.0,
            text: String::new(),
        }
    }

    /// Attach the positive-sentiment score.
    pub fn with_positive_score(mut self, positive_score: f64) -> Self {
        self.positive_score = positive_score;
        self
    }
}
