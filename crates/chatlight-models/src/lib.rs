//! Shared data models for the chatlight highlight pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Scored chat comments (pipeline input)
//! - Time-bin aggregates and smoothed score series
//! - Candidate windows, finalized clips, and ranked results
//! - Overall-excitement periods

pub mod category;
pub mod clip;
pub mod comment;
pub mod excitement;
pub mod time;
pub mod timebin;

// Re-export common types
pub use category::{CategoryScores, EmotionCategory};
pub use clip::{
    CandidateWindow, Clip, HighlightSet, RankedClip, RefineReason, SubclipDebug, SubclipWindow,
};
pub use comment::ScoredComment;
pub use excitement::ExcitementPeriod;
pub use time::{format_timestamp, parse_timestamp, TimestampError};
pub use timebin::TimeBin;
