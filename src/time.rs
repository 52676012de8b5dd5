//! Race time parsing and formatting
//!
//! Converts `MM:SS` / `HH:MM:SS` text into seconds and back, and renders
//! 400 m splits at tenth-of-a-second resolution.

use crate::error::{Result, VdotError};

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3600;

/// Parse `MM:SS` or `HH:MM:SS` into a positive number of seconds
///
/// Each part must be a non-negative decimal number; fractional seconds such
/// as `4:59.5` are accepted. Minutes are not capped at 59 in the two-part
/// form, so `75:00` is 4500 seconds.
pub fn parse_time(text: &str) -> Result<f64> {
    let malformed = || VdotError::MalformedTime {
        input: text.to_string(),
    };

    let parts = text
        .trim()
        .split(':')
        .map(parse_part)
        .collect::<Option<Vec<f64>>>()
        .ok_or_else(malformed)?;

    let seconds = match parts.as_slice() {
        [minutes, seconds] => minutes * 60.0 + seconds,
        [hours, minutes, seconds] => hours * 3600.0 + minutes * 60.0 + seconds,
        _ => return Err(malformed()),
    };

    if !seconds.is_finite() {
        return Err(malformed());
    }
    if seconds <= 0.0 {
        return Err(VdotError::NonPositiveDuration { seconds });
    }

    Ok(seconds)
}

fn parse_part(part: &str) -> Option<f64> {
    let part = part.trim();
    if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    part.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Format seconds as `M:SS` or `H:MM:SS`
///
/// The value is rounded to whole seconds before it is decomposed, so a
/// remainder that rounds up to 60 carries into the next unit.
pub fn format_time(seconds: f64) -> String {
    let total = whole_seconds(seconds);
    let hours = total / SECONDS_PER_HOUR;
    let minutes = (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let secs = total % SECONDS_PER_MINUTE;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Format a split as `M:SS.s`, rounded to the nearest tenth of a second
pub fn format_split(seconds: f64) -> String {
    let tenths = if seconds.is_finite() && seconds > 0.0 {
        (seconds * 10.0).round() as u64
    } else {
        0
    };
    let minutes = tenths / 600;
    let rem = tenths % 600;
    format!("{}:{:02}.{}", minutes, rem / 10, rem % 10)
}

/// Round to one decimal place
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn whole_seconds(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds.round() as u64
    } else {
        0
    }
}
