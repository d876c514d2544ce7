// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for civil date/time parsing, zone conversion and
//! Julian day arithmetic.

use chrono::{
    DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat,
    TimeZone, Utc,
};
use chrono_tz::Tz;
use regex::Regex;
use std::sync::LazyLock;

/// Julian day of the Unix epoch (1970-01-01T00:00:00Z).
const JD_UNIX_EPOCH: f64 = 2_440_587.5;
const SECONDS_PER_DAY: f64 = 86_400.0;

static AMPM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{1,2}):(\d{2})(?::(\d{2}))?\s*([AaPp][Mm])\s*$")
        .expect("AM/PM pattern is valid")
});

/// Errors from parsing civil time inputs.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TimeError {
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Time must be HH:MM or HH:MM:SS or include AM/PM")]
    InvalidTimeFormat,

    #[error("Invalid time fields")]
    InvalidTimeFields,

    #[error("Unknown timezone '{0}'")]
    UnknownTimezone(String),

    #[error("Local time {0} does not exist in {1}")]
    NonexistentLocalTime(String, String),

    #[error("Invalid datetime '{0}'")]
    InvalidDateTime(String),
}

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Format an instant as RFC3339 in the given zone (with its offset).
pub fn format_local_rfc3339(date: DateTime<Utc>, tz: Tz) -> String {
    date.with_timezone(&tz)
        .to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Parse a strict `YYYY-MM-DD` date.
pub fn parse_date(iso: &str) -> Result<NaiveDate, TimeError> {
    NaiveDate::parse_from_str(iso.trim(), "%Y-%m-%d")
        .map_err(|_| TimeError::InvalidDate(iso.to_string()))
}

/// Parse `04:20`, `04:20:00`, `4:20 AM`, `4:20 pm` or `04:20:00 AM`.
///
/// Returns `(hour24, minute, second)`.
pub fn parse_time_24_or_ampm(tob: &str) -> Result<(u32, u32, u32), TimeError> {
    let s = tob.trim();
    if let Some(caps) = AMPM_RE.captures(s) {
        let mut hh: u32 = caps[1].parse().map_err(|_| TimeError::InvalidTimeFields)?;
        let mm: u32 = caps[2].parse().map_err(|_| TimeError::InvalidTimeFields)?;
        let ss: u32 = caps
            .get(3)
            .map(|m| m.as_str().parse())
            .transpose()
            .map_err(|_| TimeError::InvalidTimeFields)?
            .unwrap_or(0);
        if !(1..=12).contains(&hh) || mm >= 60 || ss >= 60 {
            return Err(TimeError::InvalidTimeFields);
        }
        if hh == 12 {
            hh = 0;
        }
        if caps[4].eq_ignore_ascii_case("pm") {
            hh += 12;
        }
        return Ok((hh, mm, ss));
    }

    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 2 && parts.len() != 3 {
        return Err(TimeError::InvalidTimeFormat);
    }
    let field = |p: &str| p.trim().parse::<u32>().map_err(|_| TimeError::InvalidTimeFormat);
    let hh = field(parts[0])?;
    let mm = field(parts[1])?;
    let ss = if parts.len() == 3 { field(parts[2])? } else { 0 };
    if hh >= 24 || mm >= 60 || ss >= 60 {
        return Err(TimeError::InvalidTimeFields);
    }
    Ok((hh, mm, ss))
}

/// Parse an IANA timezone name such as `Asia/Kolkata`.
pub fn parse_tz(name: &str) -> Result<Tz, TimeError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| TimeError::UnknownTimezone(name.to_string()))
}

/// Resolve a naive local datetime in `tz` to UTC.
///
/// Ambiguous times (clocks going back) resolve to the earlier instant.
pub fn resolve_local(naive: NaiveDateTime, tz: Tz) -> Result<DateTime<Utc>, TimeError> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(TimeError::NonexistentLocalTime(
            naive.to_string(),
            tz.name().to_string(),
        )),
    }
}

/// Combine a local date and time-of-day string and convert to UTC.
pub fn local_to_utc(date_iso: &str, time: &str, tz: Tz) -> Result<DateTime<Utc>, TimeError> {
    let date = parse_date(date_iso)?;
    let (hh, mm, ss) = parse_time_24_or_ampm(time)?;
    let time = NaiveTime::from_hms_opt(hh, mm, ss).ok_or(TimeError::InvalidTimeFields)?;
    resolve_local(date.and_time(time), tz)
}

/// Parse an instant: RFC3339 with offset, or a naive datetime/date
/// interpreted in `default_tz`.
pub fn parse_instant(iso: &str, default_tz: Tz) -> Result<DateTime<Utc>, TimeError> {
    let s = iso.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return resolve_local(naive, default_tz);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return resolve_local(date.and_time(NaiveTime::MIN), default_tz);
    }
    Err(TimeError::InvalidDateTime(iso.to_string()))
}

/// Julian day (UT) of an instant.
pub fn julian_day_ut(dt: DateTime<Utc>) -> f64 {
    let secs = dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) * 1e-9;
    JD_UNIX_EPOCH + secs / SECONDS_PER_DAY
}

/// Duration of a (possibly fractional) number of days.
pub fn days(n: f64) -> Duration {
    Duration::milliseconds((n * SECONDS_PER_DAY * 1000.0).round() as i64)
}
