//! Urgency classification of a single homework card.
//!
//! The class is a pure function of one item and a reference instant. It is
//! evaluated at render time against wall-clock time, so it only changes on
//! the next render.

use super::format::parse_instant;
use crate::model::homework::HomeworkItem;
use chrono::{DateTime, Utc};
use std::fmt::{Display, Formatter};

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Derived display category for a homework card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Urgency {
    Completed,
    /// No usable due date.
    NoDeadline,
    Overdue,
    /// Due within the current or the next whole day.
    DueSoon,
    DueLater,
}

impl Urgency {
    /// Class name used by renderers.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::NoDeadline => "none",
            Self::Overdue => "overdue",
            Self::DueSoon => "due-soon",
            Self::DueLater => "due-later",
        }
    }
}

impl Display for Urgency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies one item relative to `now`.
///
/// Rules, first match wins:
/// - completed item -> `Completed`
/// - missing or unparseable due date -> `NoDeadline`
/// - `days = floor((due - now) / 1 day)`; `days < 0` -> `Overdue`
/// - `days <= 1` -> `DueSoon`
/// - otherwise -> `DueLater`
pub fn classify(item: &HomeworkItem, now: DateTime<Utc>) -> Urgency {
    if item.completed {
        return Urgency::Completed;
    }

    let Some(due) = item.date_due.as_deref().and_then(parse_instant) else {
        return Urgency::NoDeadline;
    };

    let days = (due - now).num_milliseconds().div_euclid(MS_PER_DAY);
    if days < 0 {
        Urgency::Overdue
    } else if days <= 1 {
        Urgency::DueSoon
    } else {
        Urgency::DueLater
    }
}
