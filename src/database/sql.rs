//! SQL helpers: IN-list placeholders and timestamp text

use super::Error;
use chrono::{Duration, NaiveDateTime};

/// Timestamp text format used for every time column written by these tools
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// The backend may write fractional seconds or an ISO 'T' separator.
const READ_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Build the placeholder list for an `IN (...)` clause
///
/// Placeholders are numbered from `first`, so the clause can follow other
/// positional parameters: `in_clause(2, 3)` yields `?2, ?3, ?4`.
///
/// SQLite rejects `IN ()`, so an empty list yields `NULL`, which matches
/// nothing.
pub fn in_clause(first: usize, count: usize) -> String {
    if count == 0 {
        return "NULL".to_string();
    }

    (first..first + count)
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format a timestamp for storage
pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a stored timestamp
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime, Error> {
    READ_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text.trim(), fmt).ok())
        .ok_or_else(|| Error::InvalidTimestamp(text.to_string()))
}

/// `now` shifted into the past by whole minutes
///
/// Offsets that leave chrono's date range are an error, not a panic.
pub fn minutes_before(now: NaiveDateTime, minutes: i64) -> Result<NaiveDateTime, Error> {
    Duration::try_minutes(minutes)
        .and_then(|offset| now.checked_sub_signed(offset))
        .ok_or_else(|| Error::OffsetOutOfRange(format!("{} minutes", minutes)))
}

/// `now` shifted into the past by whole hours
pub fn hours_before(now: NaiveDateTime, hours: i64) -> Result<NaiveDateTime, Error> {
    let minutes = hours
        .checked_mul(60)
        .ok_or_else(|| Error::OffsetOutOfRange(format!("{} hours", hours)))?;
    minutes_before(now, minutes)
}
