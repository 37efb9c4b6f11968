//! Overall-excitement period models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A period of elevated overall chat activity.
///
/// Unlike per-category clips, excitement periods score the whole chat
/// (comment volume plus positive sentiment) rather than a single emotion
/// channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExcitementPeriod {
    /// Period start in seconds.
    pub start_secs: f64,

    /// Period end in seconds.
    pub end_secs: f64,

    /// Highest composite excitement score among the merged source bins.
    pub max_score: f64,

    /// Start time of the bin that produced `max_score`; re-centering anchors
    /// on this when a merged period runs overlong.
    pub best_score_time_secs: f64,

    /// 1-based rank by `max_score` across all returned periods.
    pub rank: u32,
}

impl ExcitementPeriod {
    /// Period length in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.end_secs - self.start_secs
    }
}
