//! Error types for highlight analysis.

use thiserror::Error;

/// Result type for highlight analysis operations.
pub type HighlightResult<T> = Result<T, HighlightError>;

/// Errors that abort a highlight run.
///
/// Failure is per-run: any of these surfacing mid-pipeline fails the entire
/// highlight request for the video, and callers must treat the result as
/// empty rather than partial. Degradation (a category with no data, fewer
/// clips than the quota) is not an error.
#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid stream duration: {0} seconds")]
    InvalidDuration(f64),
}

impl HighlightError {
    /// Create a configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
