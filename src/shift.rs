use chrono::{Duration, NaiveDate, NaiveTime};

use crate::error::{LedgerError, LedgerResult};

const MS_PER_HOUR: f64 = 3_600_000.0;

/// Parses a wall-clock time given as `HH:MM` or `HH:MM:SS`.
pub fn parse_clock_time(s: &str) -> LedgerResult<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| LedgerError::Invalid(format!("Invalid time '{}'. Use HH:MM.", s)))
}

/// Length of a shift in hours, at full precision.
///
/// Both times are placed on the same arbitrary date. When `end` is earlier
/// than `start` the shift is taken to finish on the next calendar day.
pub fn compute_shift_hours(start: NaiveTime, end: NaiveTime) -> f64 {
    let day = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default();
    let start = day.and_time(start);
    let mut end = day.and_time(end);
    if end < start {
        end += Duration::days(1);
    }
    (end - start).num_milliseconds() as f64 / MS_PER_HOUR
}

/// Rounds to two decimal places for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
