//! Date parsing and display formatting for homework cards.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

const NAIVE_DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Placeholder shown for a missing due date.
pub const NO_DUE_DATE: &str = "—";

/// Parses a stored date or timestamp into an instant.
///
/// - `YYYY-MM-DD` is UTC midnight of that day.
/// - RFC 3339 values keep their offset.
/// - Date-times without an offset are local time.
///
/// Returns `None` for empty or unrecognised input.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    if let Ok(at) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(at.with_timezone(&Utc));
    }

    NAIVE_DATE_TIME_FORMATS.iter().find_map(|format| {
        let naive = NaiveDateTime::parse_from_str(trimmed, format).ok()?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|at| at.with_timezone(&Utc))
    })
}

/// Formats `date_created` as `DD.MM.YYYY HH:MM` in local time.
///
/// Missing or unparseable values render as an empty string.
pub fn format_created(date_created: Option<&str>) -> String {
    format_created_in(date_created, &Local)
}

/// Same as [`format_created`] with an explicit display time zone.
pub fn format_created_in<Tz: TimeZone>(date_created: Option<&str>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date_created
        .and_then(parse_instant)
        .map(|at| at.with_timezone(tz).format("%d.%m.%Y %H:%M").to_string())
        .unwrap_or_default()
}

/// Formats a due date by reversing its dash-separated parts.
///
/// `2025-10-05` renders as `05.10.2025`; a missing value renders as `—`.
pub fn format_due(date_due: Option<&str>) -> String {
    match date_due {
        Some(raw) if !raw.is_empty() => raw.split('-').rev().collect::<Vec<_>>().join("."),
        _ => NO_DUE_DATE.to_string(),
    }
}
