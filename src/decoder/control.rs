//! Control-column normalisation.
//!
//! Control columns are metadata: an invalid cell is nulled and never carries
//! a QC triplet.

use super::part::parse_numeric;
use crate::constants::control;
use crate::models::Value;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// Output column holding the combined observation instant
pub const TIMESTAMP_COLUMN: &str = "timestamp_utc";

static CALL_SIGN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(control::CALL_SIGN_PATTERN).expect("call sign pattern is a valid regex")
});

/// True for the columns handled by [`normalise_control`]
pub fn is_control_column(column: &str) -> bool {
    control::ALL.contains(&column)
}

/// Accept exactly eight digits naming a real calendar day (`YYYYMMDD`)
pub fn parse_date(token: &str) -> Option<NaiveDate> {
    if token.len() != 8 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = token[..4].parse().ok()?;
    let month = token[4..6].parse().ok()?;
    let day = token[6..].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Accept exactly four digits `HHMM` with hour 0-23 and minute 0-59
pub fn parse_time(token: &str) -> Option<NaiveTime> {
    if token.len() != 4 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hour = token[..2].parse().ok()?;
    let minute = token[2..].parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Decompose a Global Hourly `YYYY-MM-DDTHH:MM:SS` stamp into `YYYYMMDD` and `HHMM`
pub fn split_iso_timestamp(token: &str) -> Option<(String, String)> {
    let stamp = NaiveDateTime::parse_from_str(token.trim(), "%Y-%m-%dT%H:%M:%S").ok()?;
    Some((
        stamp.format("%Y%m%d").to_string(),
        stamp.format("%H%M").to_string(),
    ))
}

/// Normalise one control cell. Invalid or empty cells become null.
pub fn normalise_control(column: &str, raw: &str) -> Value {
    let token = raw.trim();
    if token.is_empty() {
        return Value::Null;
    }
    match column {
        control::DATE => parse_date(token)
            .map(|date| Value::text(date.format("%Y-%m-%d").to_string()))
            .unwrap_or(Value::Null),
        control::TIME => parse_time(token)
            .map(|time| Value::text(time.format("%H:%M").to_string()))
            .unwrap_or(Value::Null),
        control::LATITUDE => bounded(token, control::LATITUDE_RANGE),
        control::LONGITUDE => bounded(token, control::LONGITUDE_RANGE),
        control::ELEVATION => bounded(token, control::ELEVATION_RANGE),
        control::CALL_SIGN => {
            if token != control::CALL_SIGN_MISSING && CALL_SIGN.is_match(token) {
                Value::text(token)
            } else {
                Value::Null
            }
        }
        control::SOURCE => member(token, control::SOURCE_CODES),
        control::REPORT_TYPE => member(token, control::REPORT_TYPES),
        control::QUALITY_CONTROL => member(token, control::QUALITY_CONTROL_CODES),
        _ => Value::text(token),
    }
}

/// Combined `YYYY-MM-DDTHH:MM:00Z` stamp from raw date and time tokens
pub fn timestamp(date: &str, time: &str) -> Option<Value> {
    let date = parse_date(date.trim())?;
    let time = parse_time(time.trim())?;
    let stamp = date.and_time(time).and_utc();
    Some(Value::text(stamp.format("%Y-%m-%dT%H:%M:%SZ").to_string()))
}

fn bounded(token: &str, (min, max): (f64, f64)) -> Value {
    match parse_numeric(token) {
        Some(value) if (min..=max).contains(&value) => Value::Number(value),
        _ => Value::Null,
    }
}

fn member(token: &str, allowed: &[&str]) -> Value {
    if allowed.contains(&token) {
        Value::text(token)
    } else {
        Value::Null
    }
}
