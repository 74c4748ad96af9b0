//! Display ordering of homework cards.
//!
//! # Invariants
//! - Ordering is two stable passes: due date ascending, then completion
//!   ascending. The second pass is the outer grouping, so every incomplete
//!   item precedes every completed one and due date only breaks ties.
//! - Missing or unparseable due dates sort after every real date.
//! - Items equal under both keys keep their fetched order.

use super::format::parse_instant;
use crate::model::homework::HomeworkItem;

/// Sort key used for items without a usable due date (largest representable
/// timestamp, in epoch milliseconds).
pub const UNDATED_SORT_KEY_MS: i64 = 8_640_000_000_000_000;

/// Returns references to `items` in display order.
pub fn display_order(items: &[HomeworkItem]) -> Vec<&HomeworkItem> {
    let mut ordered = items.iter().collect::<Vec<_>>();
    ordered.sort_by_key(|item| due_sort_key(item));
    ordered.sort_by_key(|item| item.completed);
    ordered
}

/// Due date in epoch milliseconds, or [`UNDATED_SORT_KEY_MS`].
pub fn due_sort_key(item: &HomeworkItem) -> i64 {
    item.date_due
        .as_deref()
        .and_then(parse_instant)
        .map_or(UNDATED_SORT_KEY_MS, |due| due.timestamp_millis())
}
