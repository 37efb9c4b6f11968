//! Comment-to-bin aggregation.

use tracing::debug;

use chatlight_models::{ScoredComment, TimeBin};

use crate::error::{HighlightError, HighlightResult};

/// Bucket scored comments into fixed-width time bins.
///
/// Produces bins `0..floor(duration / width)`, zero-filled where no comments
/// fall. Comments with a timestamp before 0 (pre-stream chat) or after the
/// total duration are excluded; each remaining comment lands in the bin whose
/// `[start, end)` range contains its timestamp.
pub fn aggregate_comments(
    comments: &[ScoredComment],
    total_duration_secs: f64,
    bin_width_secs: f64,
) -> HighlightResult<Vec<TimeBin>> {
    if !(bin_width_secs > 0.0) {
        return Err(HighlightError::invalid_config(format!(
            "bin width must be positive, got {}",
            bin_width_secs
        )));
    }
    if !total_duration_secs.is_finite() || total_duration_secs < 0.0 {
        return Err(HighlightError::InvalidDuration(total_duration_secs));
    }

    let bin_count = (total_duration_secs / bin_width_secs).floor() as usize;
    let mut bins: Vec<TimeBin> = (0..bin_count)
        .map(|i| {
            TimeBin::empty(
                i as f64 * bin_width_secs,
                (i + 1) as f64 * bin_width_secs,
            )
        })
        .collect();

    let mut included = 0usize;
    for comment in comments {
        let ts = comment.timestamp_secs;
        if !ts.is_finite() || ts < 0.0 || ts > total_duration_secs {
            continue;
        }
        let index = (ts / bin_width_secs).floor() as usize;
        // A timestamp equal to the total duration lands past the last bin.
        let Some(bin) = bins.get_mut(index) else {
            continue;
        };
        bin.comment_count += 1;
        bin.scores.accumulate(&comment.scores);
        bin.positive_sum += comment.positive_score;
        included += 1;
    }

    debug!(
        bins = bins.len(),
        comments = comments.len(),
        included = included,
        bin_width_secs = bin_width_secs,
        "aggregated comments into time bins"
    );

    Ok(bins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatlight_models::{CategoryScores, EmotionCategory};

    fn make_comment(ts: f64, category: EmotionCategory, score: f64) -> ScoredComment {
        ScoredComment::new(ts, CategoryScores::single(category, score))
    }

    #[test]
    fn test_empty_comments_yield_zero_bins() {
        let bins = aggregate_comments(&[], 600.0, 10.0).unwrap();
        assert_eq!(bins.len(), 60);
        assert!(bins.iter().all(|b| b.comment_count == 0));
        assert!(bins.iter().all(|b| b.scores == CategoryScores::default()));
    }

    #[test]
    fn test_bins_are_contiguous() {
        let bins = aggregate_comments(&[], 30.0, 10.0).unwrap();
        assert_eq!(bins.len(), 3);
        for pair in bins.windows(2) {
            assert_eq!(pair[0].end_secs, pair[1].start_secs);
        }
        assert_eq!(bins[0].start_secs, 0.0);
        assert_eq!(bins[2].end_secs, 30.0);
    }

    #[test]
    fn test_comment_lands_in_half_open_bin() {
        let comments = vec![
            make_comment(0.0, EmotionCategory::Laugh, 1.0),
            make_comment(9.999, EmotionCategory::Laugh, 2.0),
            make_comment(10.0, EmotionCategory::Laugh, 4.0),
        ];
        let bins = aggregate_comments(&comments, 30.0, 10.0).unwrap();
        assert_eq!(bins[0].comment_count, 2);
        assert_eq!(bins[0].scores.get(EmotionCategory::Laugh), 3.0);
        assert_eq!(bins[1].comment_count, 1);
        assert_eq!(bins[1].scores.get(EmotionCategory::Laugh), 4.0);
    }

    #[test]
    fn test_out_of_range_comments_excluded() {
        let comments = vec![
            make_comment(-5.0, EmotionCategory::Chaos, 1.0),
            make_comment(601.0, EmotionCategory::Chaos, 1.0),
            make_comment(5.0, EmotionCategory::Chaos, 1.0),
        ];
        let bins = aggregate_comments(&comments, 600.0, 10.0).unwrap();
        let total: u32 = bins.iter().map(|b| b.comment_count).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn test_timestamp_at_total_duration_is_dropped() {
        // Included by the range rule, but past the last bin's [start, end).
        let comments = vec![make_comment(600.0, EmotionCategory::Laugh, 1.0)];
        let bins = aggregate_comments(&comments, 600.0, 10.0).unwrap();
        let total: u32 = bins.iter().map(|b| b.comment_count).sum();
        assert_eq!(total, 0);
    }

    #[test]
    fn test_positive_sum_accumulates() {
        let comments = vec![
            ScoredComment::new(1.0, CategoryScores::default()).with_positive_score(2.0),
            ScoredComment::new(2.0, CategoryScores::default()).with_positive_score(3.0),
        ];
        let bins = aggregate_comments(&comments, 10.0, 10.0).unwrap();
        assert_eq!(bins[0].positive_sum, 5.0);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(aggregate_comments(&[], 600.0, 0.0).is_err());
        assert!(aggregate_comments(&[], -1.0, 10.0).is_err());
    }
}
