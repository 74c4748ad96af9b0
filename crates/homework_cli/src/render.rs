//! Plain-text rendering of homework cards.

use chrono::TimeZone;
use homework_core::view::format::{format_created_in, format_due};
use homework_core::DisplayRow;
use std::io::{self, Write};

/// Shown instead of cards when the diary is empty.
pub const EMPTY_LIST_MESSAGE: &str = "No homework yet.";

/// Writes one card per row, in the given order.
///
/// Creation times are shown in `tz`; due dates are shown as stored.
pub fn render_rows<W, Tz>(out: &mut W, rows: &[DisplayRow<'_>], tz: &Tz) -> io::Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    if rows.is_empty() {
        return writeln!(out, "{EMPTY_LIST_MESSAGE}");
    }

    for (index, row) in rows.iter().enumerate() {
        if index > 0 {
            writeln!(out)?;
        }
        let item = row.item;
        let done = if item.completed { "x" } else { " " };
        writeln!(out, "[{done}] #{} ({})", item.id, row.urgency)?;
        writeln!(
            out,
            "    Created: {} | Due: {}",
            format_created_in(item.date_created.as_deref(), tz),
            format_due(item.date_due.as_deref())
        )?;
        writeln!(
            out,
            "    {} — {}",
            item.subject.as_deref().unwrap_or_default(),
            item.title.as_deref().unwrap_or_default()
        )?;
        if let Some(kind) = non_empty(item.kind.as_deref()) {
            writeln!(out, "    Type: {kind}")?;
        }
        if let Some(description) = non_empty(item.description.as_deref()) {
            writeln!(out, "    {description}")?;
        }
    }

    Ok(())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}
