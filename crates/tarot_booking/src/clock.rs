// --- File: crates/tarot_booking/src/clock.rs ---
//! 12-hour clock labels and their inverse.
//!
//! Slot labels are rendered as `hh:MM AM - hh:MM PM` and the selected label
//! is parsed back before submission, so [`parse_12_hour`] must exactly undo
//! [`format_12_hour`]. A mismatch shifts the booked interval by 12 hours.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use thiserror::Error;

/// Separator between the start and end of a slot label.
pub const RANGE_SEPARATOR: &str = " - ";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    #[error("Invalid 12-hour time: {0}")]
    InvalidTime(String),
    #[error("Invalid time range: {0}")]
    InvalidRange(String),
}

/// `09:05 AM`, `12:00 PM`, `12:30 AM`.
pub fn format_12_hour(time: NaiveTime) -> String {
    let (is_pm, hour) = time.hour12();
    format!(
        "{:02}:{:02} {}",
        hour,
        time.minute(),
        if is_pm { "PM" } else { "AM" }
    )
}

/// Parses `hh:MM AM|PM` (case-insensitive, single-digit hour allowed).
///
/// 12 AM is hour 0, 12 PM stays 12, PM adds 12 to hours 1 to 11.
pub fn parse_12_hour(text: &str) -> Result<NaiveTime, ClockError> {
    let invalid = || ClockError::InvalidTime(text.to_string());

    let mut parts = text.split_whitespace();
    let (Some(clock), Some(modifier), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };
    let (hour_str, minute_str) = clock.split_once(':').ok_or_else(invalid)?;
    let hour: u32 = hour_str.parse().map_err(|_| invalid())?;
    let minute: u32 = minute_str.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&hour) || minute_str.len() != 2 {
        return Err(invalid());
    }

    let hour = match (modifier.to_ascii_uppercase().as_str(), hour) {
        ("AM", 12) => 0,
        ("AM", h) => h,
        ("PM", 12) => 12,
        ("PM", h) => h + 12,
        _ => return Err(invalid()),
    };
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

/// `09:00 AM - 10:00 AM`
pub fn format_range(start: NaiveTime, end: NaiveTime) -> String {
    format!(
        "{}{}{}",
        format_12_hour(start),
        RANGE_SEPARATOR,
        format_12_hour(end)
    )
}

/// Splits and parses a label produced by [`format_range`].
pub fn parse_range(label: &str) -> Result<(NaiveTime, NaiveTime), ClockError> {
    let (start, end) = label
        .split_once(RANGE_SEPARATOR)
        .ok_or_else(|| ClockError::InvalidRange(label.to_string()))?;
    Ok((parse_12_hour(start.trim())?, parse_12_hour(end.trim())?))
}

/// Places a parsed label on `date`. An end at or before the start is on the next day.
pub fn resolve_range(
    date: NaiveDate,
    label: &str,
) -> Result<(NaiveDateTime, NaiveDateTime), ClockError> {
    let (start_time, end_time) = parse_range(label)?;
    let start = date.and_time(start_time);
    let mut end = date.and_time(end_time);
    if end <= start {
        end += Duration::days(1);
    }
    Ok((start, end))
}

/// Timestamp string sent to the booking endpoint, e.g. `2025-05-05T09:00:00.000Z`.
///
/// The wall-clock reading is sent as is with a `Z` suffix; the backend
/// interprets it in the reader's calendar.
pub fn submission_timestamp(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%dT%H:%M:00.000Z").to_string()
}
