//! Decoding of the date encodings found in search results.
//!
//! The backend mixes two encodings, sometimes within one record:
//!
//! - a bracketed millisecond epoch, `/Date(1700000000000)/`
//! - an ISO 8601 date or date-time, `2023-11-14T10:00:00`, of which only the
//!   calendar day is used
//!
//! [`parse_instant`] turns either into a UTC instant. Anything else is
//! "unparseable" and yields `None`, which callers treat as a missing value.

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use thiserror::Error;

const EPOCH_PREFIX: &str = "/Date(";
const EPOCH_SUFFIX: &str = ")/";
const DAY_FORMAT: &str = "%Y-%m-%d";
const DAY_LEN: usize = 10;

/// A caller-supplied date could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemporalError {
    #[error("Invalid date format '{value}', use YYYY-MM-DD")]
    InvalidDate { value: String },
}

/// Decode a backend date string into a UTC instant.
///
/// The millisecond encoding is tried first, recognized by its literal
/// `/Date(` prefix and `)/` suffix. A string of that shape whose payload is
/// not a non-negative integer within chrono's range is unparseable; it does
/// not fall back to the ISO path. Otherwise the first ten characters are
/// read as a calendar day and the instant is midnight UTC of that day.
///
/// ```
/// use datahub_core::temporal::parse_instant;
///
/// assert!(parse_instant("/Date(1700000000000)/").is_some());
/// assert!(parse_instant("2023-11-14T10:00:00").is_some());
/// assert!(parse_instant("/Date(abc)/").is_none());
/// assert!(parse_instant("").is_none());
/// ```
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    if value.is_empty() {
        return None;
    }

    if let Some(payload) = value
        .strip_prefix(EPOCH_PREFIX)
        .and_then(|rest| rest.strip_suffix(EPOCH_SUFFIX))
    {
        return parse_epoch_millis(payload);
    }

    let head = match value.char_indices().nth(DAY_LEN) {
        Some((idx, _)) => &value[..idx],
        None => value,
    };
    NaiveDate::parse_from_str(head, DAY_FORMAT)
        .ok()
        .map(day_start)
}

fn parse_epoch_millis(payload: &str) -> Option<DateTime<Utc>> {
    if payload.is_empty() || !payload.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let millis: i64 = payload.parse().ok()?;
    DateTime::from_timestamp_millis(millis)
}

/// Decode an optional backend value; absent values stay absent.
pub fn parse_optional(value: Option<&str>) -> Option<DateTime<Utc>> {
    value.and_then(parse_instant)
}

/// Parse a filter boundary strictly as `YYYY-MM-DD`.
pub fn parse_day_boundary(value: &str) -> Result<NaiveDate, TemporalError> {
    NaiveDate::parse_from_str(value, DAY_FORMAT).map_err(|_| TemporalError::InvalidDate {
        value: value.to_string(),
    })
}

/// Midnight UTC at the start of `day`.
pub fn day_start(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

/// Render an instant for machine consumption (`2023-11-14T22:13:20Z`).
pub fn to_iso(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}
