//! ISO-8601 timestamp parsing and formatting for `creationDate`.

use chrono::{DateTime, NaiveDateTime, Timelike};
use serde::Serializer;

use crate::errors::DecodeError;

const WHOLE_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";
const FRACTIONAL_SECONDS: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parse a timestamp in one of the accepted granularities.
///
/// Accepts whole seconds, fractional seconds, and RFC 3339 strings carrying an
/// offset (normalised to UTC).
///
/// # Errors
///
/// Returns [`DecodeError::Timestamp`] echoing `field` and the original string.
pub fn parse(field: &str, value: &str) -> Result<NaiveDateTime, DecodeError> {
    NaiveDateTime::parse_from_str(value, WHOLE_SECONDS)
        .or_else(|_| NaiveDateTime::parse_from_str(value, FRACTIONAL_SECONDS))
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.naive_utc()))
        .map_err(|_| DecodeError::Timestamp {
            field: field.to_string(),
            value: value.to_string(),
        })
}

/// Render a timestamp; the fraction is written only when non-zero.
#[must_use]
pub fn format(at: &NaiveDateTime) -> String {
    at.format(FRACTIONAL_SECONDS).to_string()
}

/// `serialize_with` adapter for [`NaiveDateTime`] fields.
pub(crate) fn serialize<S: Serializer>(at: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(at))
}

/// The current local time truncated to whole seconds.
#[must_use]
pub fn now() -> NaiveDateTime {
    let now = chrono::Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}
