//! Net duration of a work entry.
//!
//! The calculator never fails: anything that cannot be turned into a sane
//! interval yields `0.0` hours.
//!
//! - unparsable start or end instant → 0
//! - end at or before start → 0
//! - span longer than 24 hours → 0
//! - break that does not parse, or whose end is not after its start → ignored
//! - break longer than the work interval → clamps the result to 0
//!
//! Results are rounded to two decimals.

use crate::libs::entry::WorkEntry;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Longest accepted span between start and end, in hours.
pub const MAX_SPAN_HOURS: f64 = 24.0;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// Computes the net worked hours of `entry`, break subtracted.
pub fn compute_duration_hours(entry: &WorkEntry) -> f64 {
    let (Some(start), Some(end)) = (
        parse_instant(&entry.start_date, &entry.start_time),
        parse_instant(&entry.end_date, &entry.end_time),
    ) else {
        return 0.0;
    };
    if end <= start {
        return 0.0;
    }

    let mut hours = seconds_to_hours((end - start).num_seconds());
    if hours > MAX_SPAN_HOURS {
        return 0.0;
    }

    if entry.has_break {
        if let Some(break_hours) = break_hours(entry) {
            hours = (hours - break_hours.min(hours)).max(0.0);
        }
    }

    round2(hours)
}

/// Length of the entry's break in hours, when both break instants parse and
/// the break end comes after its start.
pub fn break_hours(entry: &WorkEntry) -> Option<f64> {
    let start = parse_break_instant(&entry.start_date, entry.break_start_hour.as_deref(), entry.break_start_min.as_deref())?;
    let end = parse_break_instant(&entry.start_date, entry.break_end_hour.as_deref(), entry.break_end_min.as_deref())?;
    if end <= start {
        return None;
    }
    Some(seconds_to_hours((end - start).num_seconds()))
}

/// Rounds to two decimals, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rounds to one decimal, halves away from zero.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn seconds_to_hours(seconds: i64) -> f64 {
    seconds as f64 / 3600.0
}

fn parse_instant(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).ok()?;
    let time = NaiveTime::parse_from_str(time.trim(), TIME_FORMAT).ok()?;
    Some(date.and_time(time))
}

fn parse_break_instant(date: &str, hour: Option<&str>, minute: Option<&str>) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).ok()?;
    let hour = parse_component(hour, 23)?;
    let minute = parse_component(minute, 59)?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    Some(date.and_time(time))
}

/// Parses a 1-2 digit clock component. Missing or blank reads as zero.
fn parse_component(value: Option<&str>, max: u32) -> Option<u32> {
    let value = match value.map(str::trim) {
        None | Some("") => return Some(0),
        Some(value) => value,
    };
    if value.len() > 2 || !value.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    value.parse::<u32>().ok().filter(|v| *v <= max)
}
