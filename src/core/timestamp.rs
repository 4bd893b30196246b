//! Record timestamp formatting
//!
//! Every shipped record carries its capture time as text in a single fixed
//! layout: ISO 8601 in UTC with millisecond precision, e.g.
//! `2025-01-08T10:30:45.123Z`. Ingestion endpoints index on this field, so
//! the layout is not configurable.

use chrono::{DateTime, NaiveDateTime, Utc};

/// strftime layout of the `timestamp` field
pub const RECORD_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Format a `DateTime<Utc>` in the record layout
///
/// # Examples
///
/// ```
/// use log_shipper::core::timestamp::format_timestamp;
/// use chrono::Utc;
///
/// let timestamp = format_timestamp(&Utc::now());
/// assert!(timestamp.ends_with('Z'));
/// assert_eq!(timestamp.len(), 24);
/// ```
#[must_use]
pub fn format_timestamp(datetime: &DateTime<Utc>) -> String {
    datetime.format(RECORD_TIMESTAMP_FORMAT).to_string()
}

/// Parse a timestamp previously produced by [`format_timestamp`]
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, RECORD_TIMESTAMP_FORMAT).map(|naive| naive.and_utc())
}
