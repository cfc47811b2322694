//! Row-to-entity parsing helpers.
//!
//! Dates are stored as fixed-width RFC 3339 text with millisecond precision
//! (`2026-02-09T14:30:00.000Z`), so lexical comparison in SQL agrees with
//! chronological order.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::DatabaseError;

/// Render a timestamp in the stored text format.
#[must_use]
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a stored TEXT column as `DateTime<Utc>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string is not RFC 3339.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Truncate to what the store can represent, so a value returned by a save
/// compares equal to the same value read back later.
///
/// # Errors
///
/// See [`parse_datetime`].
pub fn stored_datetime(dt: &DateTime<Utc>) -> Result<DateTime<Utc>, DatabaseError> {
    parse_datetime(&format_datetime(dt))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}
