//! Timestamp helpers
//!
//! Parses the loose timestamp forms accepted on the command line and renders
//! the fixed output forms: request timestamps (v2 and archive tiers) and
//! file-name stamps.
//!
//! Accepted inputs:
//! - `14d`, `48h`, `360m` - offsets back from now
//! - `YYYYMMDDHHMM`
//! - `YYYY-MM-DD HH:MM`
//! - ISO 8601 / RFC 3339, e.g. `2020-01-06T17:00:00Z` or `2013-11-15T17:16:42.000Z`

use crate::error::{Error, Result};
use chrono::{DateTime, Duration, NaiveDateTime, SecondsFormat, Utc};
use regex::Regex;
use std::sync::LazyLock;

/// Regex for relative offsets: 7d, 48h, 360m, 1.5h
static RELATIVE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)?)([dhm])$").unwrap());

/// Parse a user-supplied timestamp relative to `now`
pub fn parse_timestamp(input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let trimmed = input.trim();
    let invalid = || Error::InvalidTimestamp {
        input: input.to_string(),
    };

    if let Some(caps) = RELATIVE_REGEX.captures(&trimmed.to_lowercase()) {
        let amount: f64 = caps[1].parse().map_err(|_| invalid())?;
        let unit = &caps[2];
        let mut seconds = match unit {
            "d" => amount * 24.0 * 60.0 * 60.0,
            "h" => amount * 60.0 * 60.0,
            _ => amount * 60.0,
        };
        // A full 7-day window would start just outside what recent search serves
        if unit == "d" && (amount - 7.0).abs() < f64::EPSILON {
            seconds -= 60.0;
        }
        if !seconds.is_finite() || seconds >= i64::MAX as f64 {
            return Err(invalid());
        }
        return Duration::try_seconds(seconds as i64)
            .and_then(|offset| now.checked_sub_signed(offset))
            .ok_or_else(invalid);
    }

    if trimmed.len() == 12 && trimmed.chars().all(|c| c.is_ascii_digit()) {
        return NaiveDateTime::parse_from_str(trimmed, "%Y%m%d%H%M")
            .map(|dt| dt.and_utc())
            .map_err(|_| invalid());
    }

    if trimmed.len() == 16 {
        return NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M")
            .map(|dt| dt.and_utc())
            .map_err(|_| invalid());
    }

    if trimmed.len() > 16 {
        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(dt.with_timezone(&Utc));
        }
        return NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
            .map(|dt| dt.and_utc())
            .map_err(|_| invalid());
    }

    Err(invalid())
}

/// Render a timestamp the way the search API expects it
pub fn request_timestamp(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Render a timestamp the way premium and enterprise search expect it
pub fn archive_timestamp(time: &DateTime<Utc>) -> String {
    time.format("%Y%m%d%H%M").to_string()
}

/// Render a timestamp for use in an output file name
pub fn file_stamp(time: &DateTime<Utc>) -> String {
    time.format("%Y%m%d%H%M%S").to_string()
}

/// Parse an item's `created_at` value
///
/// Accepts the v2 RFC 3339 form and the v1.1 `Wed Oct 10 20:19:24 +0000 2018` form.
pub fn parse_created_at(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, "%a %b %d %H:%M:%S %z %Y"))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
