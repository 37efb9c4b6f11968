//! Timestamp parsing and formatting helpers.
//!
//! Exclusion-zone lengths arrive from callers as either bare seconds or
//! clock-style strings; everything downstream works in `f64` seconds.

use thiserror::Error;

/// Error for a timestamp string that cannot be converted to seconds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid timestamp format: {0}")]
pub struct TimestampError(pub String);

/// Parse a timestamp string (HH:MM:SS(.mmm), MM:SS(.mmm), or SS(.mmm)) to
/// total seconds.
pub fn parse_timestamp(ts: &str) -> Result<f64, TimestampError> {
    let invalid = || TimestampError(ts.to_string());
    let parts: Vec<&str> = ts.split(':').collect();
    match parts.len() {
        1 => parts[0].trim().parse().map_err(|_| invalid()),
        2 => {
            let minutes: f64 = parts[0].trim().parse().map_err(|_| invalid())?;
            let seconds: f64 = parts[1].trim().parse().map_err(|_| invalid())?;
            Ok(minutes * 60.0 + seconds)
        }
        3 => {
            let hours: f64 = parts[0].trim().parse().map_err(|_| invalid())?;
            let minutes: f64 = parts[1].trim().parse().map_err(|_| invalid())?;
            let seconds: f64 = parts[2].trim().parse().map_err(|_| invalid())?;
            Ok(hours * 3600.0 + minutes * 60.0 + seconds)
        }
        _ => Err(invalid()),
    }
}

/// Format seconds as an `HH:MM:SS.mmm` timestamp.
pub fn format_timestamp(seconds: f64) -> String {
    let hours = (seconds / 3600.0).floor() as u32;
    let minutes = ((seconds % 3600.0) / 60.0).floor() as u32;
    let secs = seconds % 60.0;
    format!("{:02}:{:02}:{:06.3}", hours, minutes, secs)
}
