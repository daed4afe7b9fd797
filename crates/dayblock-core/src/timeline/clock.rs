//! Conversions between `HH:MM` clock strings and minute offsets.

use chrono::{NaiveTime, Timelike};

use crate::error::TimeError;

/// Minutes in one day; displayed clock times wrap at this boundary.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Formats a minute offset as a zero-padded `HH:MM` clock string.
///
/// The offset wraps into `[0, 1440)` with Euclidean modulo, so values past
/// midnight roll over (`1500 -> "01:00"`) and negative values count back
/// from midnight (`-30 -> "23:30"`). No day marker is produced.
pub fn minutes_to_time(total_minutes: i64) -> String {
    let normalized = total_minutes.rem_euclid(MINUTES_PER_DAY);
    format!("{:02}:{:02}", normalized / 60, normalized % 60)
}

/// Parses a `HH:MM` clock string into minutes since midnight.
///
/// # Errors
/// Returns [`TimeError::Malformed`] unless the input is one or two hour
/// digits, a colon and two minute digits naming a time in `00:00..=23:59`.
pub fn time_to_minutes(input: &str) -> Result<i64, TimeError> {
    let time = parse_clock(input).ok_or_else(|| TimeError::Malformed {
        input: input.to_string(),
    })?;
    Ok(i64::from(time.num_seconds_from_midnight() / 60))
}

fn parse_clock(input: &str) -> Option<NaiveTime> {
    let (hours, minutes) = input.split_once(':')?;
    if !is_digits(hours, 1..=2) || !is_digits(minutes, 2..=2) {
        return None;
    }
    NaiveTime::from_hms_opt(hours.parse().ok()?, minutes.parse().ok()?, 0)
}

fn is_digits(part: &str, width: std::ops::RangeInclusive<usize>) -> bool {
    width.contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
}
