// Timestamp parsing and display, always in UTC
use chrono::{DateTime, NaiveDateTime, Utc};

#[derive(Debug, thiserror::Error)]
#[error("invalid timestamp {input:?}: {source}")]
pub struct TimeFormatError {
    input: String,
    #[source]
    source: chrono::ParseError,
}

// Layouts accepted for timestamps that carry no offset
const NAIVE_LAYOUTS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse an ISO-8601 timestamp into an instant.
///
/// RFC 3339 strings are converted from their offset to UTC. A timestamp
/// without an offset is read as UTC.
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>, TimeFormatError> {
    let trimmed = input.trim();

    let err = match DateTime::parse_from_rfc3339(trimmed) {
        Ok(parsed) => return Ok(parsed.with_timezone(&Utc)),
        Err(e) => e,
    };

    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(trimmed, layout).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TimeFormatError {
            input: input.to_string(),
            source: err,
        })
}

/// Render an instant as zero-padded 24-hour `HH:MM` in UTC.
pub fn format_instant(at: DateTime<Utc>) -> String {
    at.format("%H:%M").to_string()
}

#[cfg(test)]
pub fn format_time(date: &str) -> Result<String, TimeFormatError> {
    parse_timestamp(date).map(format_instant)
}
