//! Parsing of report timestamps as emitted by the surf API.
//!
//! Over its history the backend has written timestamps in several shapes:
//!
//! - `2025-08-21 12:52:44.831528104 +0000 UTC m=+48.107848006_user@example.com`
//! - `2025-08-16 10:31:39 +0000 UTC_27ebc05e-625a-4c05-add5-5e6ef33f8b8e`
//! - `2025-09-08 09:27:28` (UTC, no zone marker)
//!
//! Anything after the zone marker is an opaque payload and is discarded.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::Error;

const RUNTIME_MARKER: &str = " UTC m=";
const SUFFIX_MARKER: &str = " UTC_";

const PLAIN_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const PLAIN_LEN: usize = "YYYY-MM-DD HH:MM:SS".len();
const FRACTIONAL_OFFSET_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f %z";
const OFFSET_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Parses a backend report timestamp into a UTC instant.
///
/// Returns [`Error::Timestamp`] when no known shape matches; the caller decides
/// how to display an unknown time.
pub fn parse_reported_timestamp(raw: &str) -> Result<DateTime<Utc>, Error> {
    isolate_timestamp(raw)
        .and_then(parse_isolated)
        .ok_or_else(|| Error::Timestamp {
            raw: raw.to_string(),
        })
}

/// Strips the trailing payload, first marker wins.
fn isolate_timestamp(raw: &str) -> Option<&str> {
    if let Some((head, _)) = raw.split_once(RUNTIME_MARKER) {
        return Some(head);
    }
    if let Some((head, _)) = raw.split_once(SUFFIX_MARKER) {
        return Some(head);
    }
    is_plain_timestamp(raw).then_some(raw)
}

/// Exactly `YYYY-MM-DD HH:MM:SS`.
fn is_plain_timestamp(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == PLAIN_LEN
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            10 => *b == b' ',
            13 | 16 => *b == b':',
            _ => b.is_ascii_digit(),
        })
}

fn parse_isolated(s: &str) -> Option<DateTime<Utc>> {
    if let Some(parsed) = parse_known_formats(s) {
        return Some(parsed);
    }

    let (truncated, _) = s.split_once('.')?;
    tracing::debug!(timestamp = s, "retrying report timestamp without fractional seconds");
    parse_known_formats(truncated)
}

fn parse_known_formats(s: &str) -> Option<DateTime<Utc>> {
    parse_iso(&normalize_utc_offset(s))
        .or_else(|| parse_with_offset(s, FRACTIONAL_OFFSET_FORMAT))
        .or_else(|| parse_with_offset(s, OFFSET_FORMAT))
        .or_else(|| parse_naive_utc(s))
}

/// `... +0000` -> `...Z`.
fn normalize_utc_offset(s: &str) -> String {
    match s.strip_suffix("+0000") {
        Some(head) => format!("{}Z", head.trim_end()),
        None => s.to_string(),
    }
}

fn parse_iso(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(s) {
        return Some(parsed.with_timezone(&Utc));
    }
    // RFC 3339 permits a space separator, not every parser does.
    if s.as_bytes().get(10) == Some(&b' ') {
        let with_t = s.replacen(' ', "T", 1);
        return DateTime::parse_from_rfc3339(&with_t)
            .ok()
            .map(|parsed| parsed.with_timezone(&Utc));
    }
    None
}

fn parse_with_offset(s: &str, format: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(s, format)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// The backend stores zone-less timestamps in UTC.
fn parse_naive_utc(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, PLAIN_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}
