//! Time parsing and formatting utilities

use chrono::Duration;

use crate::domain::errors::{DomainError, DomainResult};

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Format a duration as `H:MM:SS.fffffffff` for the encoder's `-ss`/`-t` flags
///
/// Trailing zeros of the fraction are trimmed, and so is the dot when the
/// fraction is empty: 90.5s renders as `0:01:30.5`, zero as `0:00:00`.
pub fn format_sexagesimal(duration: Duration) -> String {
    let (sign, duration) = if duration < Duration::zero() {
        ("-", -duration)
    } else {
        ("", duration)
    };

    let total_nanos = duration
        .num_nanoseconds()
        .unwrap_or_else(|| duration.num_seconds().saturating_mul(NANOS_PER_SECOND));
    let nanos = total_nanos % NANOS_PER_SECOND;
    let total_seconds = total_nanos / NANOS_PER_SECOND;
    let seconds = total_seconds % 60;
    let minutes = (total_seconds / 60) % 60;
    let hours = total_seconds / 3600;

    let formatted = format!("{}{}:{:02}:{:02}.{:09}", sign, hours, minutes, seconds, nanos);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Parse a time given as seconds, `MM:SS[.f]` or `HH:MM:SS[.f]`
///
/// A leading `-` is accepted so callers can ask for an unbounded length.
pub fn parse_time(time_str: &str) -> DomainResult<Duration> {
    let trimmed = time_str.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let invalid = || {
        DomainError::BadArgs(format!(
            "Invalid time format: {}. Expected seconds, MM:SS.ms or HH:MM:SS.ms",
            time_str
        ))
    };

    let parts: Vec<&str> = body.split(':').collect();
    let seconds = match parts.as_slice() {
        [secs] => parse_seconds(secs).ok_or_else(invalid)?,
        [mins, secs] => {
            let minutes: u64 = mins.parse().map_err(|_| invalid())?;
            let seconds = parse_seconds(secs).ok_or_else(invalid)?;
            if seconds >= 60.0 {
                return Err(DomainError::BadArgs(
                    "Seconds must be less than 60".to_string(),
                ));
            }
            minutes as f64 * 60.0 + seconds
        }
        [hours, mins, secs] => {
            let hours: u64 = hours.parse().map_err(|_| invalid())?;
            let minutes: u64 = mins.parse().map_err(|_| invalid())?;
            let seconds = parse_seconds(secs).ok_or_else(invalid)?;
            if minutes >= 60 {
                return Err(DomainError::BadArgs(
                    "Minutes must be less than 60".to_string(),
                ));
            }
            if seconds >= 60.0 {
                return Err(DomainError::BadArgs(
                    "Seconds must be less than 60".to_string(),
                ));
            }
            hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds
        }
        _ => return Err(invalid()),
    };

    let duration = Duration::nanoseconds((seconds * NANOS_PER_SECOND as f64).round() as i64);
    Ok(if negative { -duration } else { duration })
}

fn parse_seconds(s: &str) -> Option<f64> {
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}
