//! Emotion categories and per-category score maps.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An independent emotion channel, scored separately per comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EmotionCategory {
    /// Laughter bursts.
    Laugh,
    /// Affection / "cute" moments.
    Healing,
    /// Chaos and excitement spikes.
    Chaos,
}

impl EmotionCategory {
    /// All categories in fixed priority order. This is both the scan order of
    /// the per-category pipelines and the first key of the final ordering.
    pub const ALL: [EmotionCategory; 3] = [
        EmotionCategory::Laugh,
        EmotionCategory::Healing,
        EmotionCategory::Chaos,
    ];

    /// Stable wire/display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionCategory::Laugh => "laugh",
            EmotionCategory::Healing => "healing",
            EmotionCategory::Chaos => "chaos",
        }
    }

    /// Position in the fixed priority order (laugh < healing < chaos).
    pub fn priority(&self) -> usize {
        match self {
            EmotionCategory::Laugh => 0,
            EmotionCategory::Healing => 1,
            EmotionCategory::Chaos => 2,
        }
    }
}

impl std::fmt::Display for EmotionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-category scores, always fully populated.
///
/// A category with no data carries 0.0 rather than a missing key, so
/// consumers index by [`EmotionCategory`] instead of branching on structural
/// presence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryScores {
    #[serde(default)]
    pub laugh: f64,
    #[serde(default)]
    pub healing: f64,
    #[serde(default)]
    pub chaos: f64,
}

impl CategoryScores {
    /// Score for one category.
    pub fn get(&self, category: EmotionCategory) -> f64 {
        match category {
            EmotionCategory::Laugh => self.laugh,
            EmotionCategory::Healing => self.healing,
            EmotionCategory::Chaos => self.chaos,
        }
    }

    /// Set the score for one category.
    pub fn set(&mut self, category: EmotionCategory, value: f64) {
        match category {
            EmotionCategory::Laugh => self.laugh = value,
            EmotionCategory::Healing => self.healing = value,
            EmotionCategory::Chaos => self.chaos = value,
        }
    }

    /// Score map with a single non-zero entry.
    pub fn single(category: EmotionCategory, value: f64) -> Self {
        let mut scores = Self::default();
        scores.set(category, value);
        scores
    }

    /// Accumulate another score map into this one, category by category.
    pub fn accumulate(&mut self, other: &CategoryScores) {
        self.laugh += other.laugh;
        self.healing += other.healing;
        self.chaos += other.chaos;
    }
}
