//! Greedy time-wise merging of per-category clip candidates.

use tracing::debug;

use chatlight_models::{CategoryScores, Clip, EmotionCategory};

/// Mutable accumulator used while merging one category's candidates.
///
/// This is a distinct shape from the emitted [`Clip`]: the transient
/// `score_history` lives only here and is discarded when the accumulator is
/// finalized, so it can never leak outward.
#[derive(Debug, Clone)]
pub struct ClipBuilder {
    /// Clip start in seconds.
    pub start_secs: f64,
    /// Clip end in seconds.
    pub end_secs: f64,
    /// Categories that have contributed to this accumulator.
    pub labels: Vec<EmotionCategory>,
    /// Per-category scores carried toward the finalized clip.
    pub scores: CategoryScores,
    /// Score of the raw candidate window this accumulator grew from.
    pub window_score: f64,
    /// Scores of every absorbed candidate; collapsed to its maximum on
    /// finalize.
    score_history: Vec<f64>,
}

impl ClipBuilder {
    /// Start an accumulator from a single expanded candidate.
    pub fn new(start_secs: f64, end_secs: f64, label: EmotionCategory, score: f64) -> Self {
        Self {
            start_secs,
            end_secs,
            labels: vec![label],
            scores: CategoryScores::single(label, score),
            window_score: score,
            score_history: vec![score],
        }
    }

    /// Rebuild an accumulator from an emitted clip, re-seeding the history
    /// with the clip's score for `label`.
    pub fn from_clip(clip: &Clip, label: EmotionCategory) -> Self {
        Self {
            start_secs: clip.start_secs,
            end_secs: clip.end_secs,
            labels: clip.labels.clone(),
            scores: clip.scores,
            window_score: clip.window_score,
            score_history: vec![clip.scores.get(label)],
        }
    }

    /// Score this accumulator carries for `label`.
    pub fn score(&self, label: EmotionCategory) -> f64 {
        self.scores.get(label)
    }

    pub fn duration_secs(&self) -> f64 {
        self.end_secs - self.start_secs
    }

    /// Freeze a lone candidate without merging. Backfill uses this to
    /// regenerate clips straight from the raw candidates.
    pub(crate) fn finalize_single(self, label: EmotionCategory) -> Clip {
        self.finalize(label)
    }

    /// Extend this accumulator with an overlapping/touching candidate.
    fn absorb(&mut self, other: ClipBuilder) {
        self.start_secs = self.start_secs.min(other.start_secs);
        self.end_secs = self.end_secs.max(other.end_secs);
        self.score_history.extend(other.score_history);
        for label in other.labels {
            if !self.labels.contains(&label) {
                self.labels.push(label);
            }
        }
    }

    /// Freeze into an immutable clip. The label's score becomes the maximum
    /// over every absorbed candidate (never their sum) and the history is
    /// dropped.
    fn finalize(mut self, label: EmotionCategory) -> Clip {
        let best = self
            .score_history
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        self.scores.set(label, best);
        self.labels.sort_by_key(|l| l.priority());
        Clip {
            start_secs: self.start_secs,
            end_secs: self.end_secs,
            duration_secs: self.end_secs - self.start_secs,
            labels: self.labels,
            main_label: label,
            scores: self.scores,
            window_score: self.window_score,
            refinement: None,
        }
    }
}

/// Merge overlapping or touching candidates for a single category.
///
/// Candidates are sorted ascending by start, then swept left to right:
/// `next.start <= current.end` (touching counts as overlap, with no gap
/// tolerance) extends the accumulator to the union interval and appends the
/// candidate's scores to the running history; a gap finalizes the
/// accumulator. Merging is never run jointly across categories, and the
/// sweep is idempotent: merged output intervals are separated by real gaps,
/// so re-merging them changes nothing.
pub fn merge_timewise(mut candidates: Vec<ClipBuilder>, label: EmotionCategory) -> Vec<Clip> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let input_len = candidates.len();
    candidates.sort_by(|a, b| {
        a.start_secs
            .partial_cmp(&b.start_secs)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut merged = Vec::new();
    let mut current: Option<ClipBuilder> = None;
    for candidate in candidates {
        match current.as_mut() {
            Some(acc) if candidate.start_secs <= acc.end_secs => {
                acc.absorb(candidate);
            }
            _ => {
                if let Some(acc) = current.take() {
                    merged.push(acc.finalize(label));
                }
                current = Some(candidate);
            }
        }
    }
    if let Some(acc) = current {
        merged.push(acc.finalize(label));
    }

    debug!(
        category = %label,
        candidates = input_len,
        merged = merged.len(),
        "merged overlapping clip candidates"
    );

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_candidates_merge_to_max_score() {
        let candidates = vec![
            ClipBuilder::new(0.0, 10.0, EmotionCategory::Laugh, 5.0),
            ClipBuilder::new(5.0, 15.0, EmotionCategory::Laugh, 6.0),
            ClipBuilder::new(20.0, 30.0, EmotionCategory::Laugh, 2.0),
        ];
        let merged = merge_timewise(candidates, EmotionCategory::Laugh);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].start_secs, 0.0);
        assert_eq!(merged[0].end_secs, 15.0);
        // Max of absorbed scores, not 11.0.
        assert_eq!(merged[0].scores.get(EmotionCategory::Laugh), 6.0);
        assert_eq!(merged[1].start_secs, 20.0);
        assert_eq!(merged[1].scores.get(EmotionCategory::Laugh), 2.0);
    }

    #[test]
    fn test_touching_counts_as_overlap() {
        let candidates = vec![
            ClipBuilder::new(0.0, 10.0, EmotionCategory::Chaos, 1.0),
            ClipBuilder::new(10.0, 20.0, EmotionCategory::Chaos, 3.0),
        ];
        let merged = merge_timewise(candidates, EmotionCategory::Chaos);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].end_secs, 20.0);
        assert_eq!(merged[0].scores.get(EmotionCategory::Chaos), 3.0);
    }

    #[test]
    fn test_gap_stays_split() {
        let candidates = vec![
            ClipBuilder::new(0.0, 10.0, EmotionCategory::Healing, 1.0),
            ClipBuilder::new(10.5, 20.0, EmotionCategory::Healing, 1.0),
        ];
        let merged = merge_timewise(candidates, EmotionCategory::Healing);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_unsorted_input_is_sorted_first() {
        let candidates = vec![
            ClipBuilder::new(20.0, 30.0, EmotionCategory::Laugh, 2.0),
            ClipBuilder::new(0.0, 10.0, EmotionCategory::Laugh, 5.0),
            ClipBuilder::new(5.0, 15.0, EmotionCategory::Laugh, 6.0),
        ];
        let merged = merge_timewise(candidates, EmotionCategory::Laugh);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].start_secs, 0.0);
    }

    #[test]
    fn test_contained_interval_does_not_shrink_accumulator() {
        let candidates = vec![
            ClipBuilder::new(0.0, 30.0, EmotionCategory::Laugh, 4.0),
            ClipBuilder::new(5.0, 10.0, EmotionCategory::Laugh, 9.0),
        ];
        let merged = merge_timewise(candidates, EmotionCategory::Laugh);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].start_secs, 0.0);
        assert_eq!(merged[0].end_secs, 30.0);
        assert_eq!(merged[0].scores.get(EmotionCategory::Laugh), 9.0);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let candidates = vec![
            ClipBuilder::new(0.0, 10.0, EmotionCategory::Laugh, 5.0),
            ClipBuilder::new(5.0, 15.0, EmotionCategory::Laugh, 6.0),
            ClipBuilder::new(15.0, 25.0, EmotionCategory::Laugh, 1.0),
            ClipBuilder::new(40.0, 50.0, EmotionCategory::Laugh, 2.0),
        ];
        let merged = merge_timewise(candidates, EmotionCategory::Laugh);

        let rebuilt: Vec<ClipBuilder> = merged
            .iter()
            .map(|c| ClipBuilder::from_clip(c, EmotionCategory::Laugh))
            .collect();
        let remerged = merge_timewise(rebuilt, EmotionCategory::Laugh);

        assert_eq!(remerged, merged);
    }

    #[test]
    fn test_empty_input() {
        assert!(merge_timewise(Vec::new(), EmotionCategory::Laugh).is_empty());
    }
}
