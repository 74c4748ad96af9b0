//! Client-side homework state container.
//!
//! # Responsibility
//! - Own the fetched collection on the client.
//! - Apply state changes only through [`StoreAction`]s.
//!
//! # Invariants
//! - Item order inside the store is the fetched order; display order is
//!   derived on demand.

use super::order::display_order;
use super::urgency::{classify, Urgency};
use crate::model::homework::{HomeworkId, HomeworkItem};
use chrono::{DateTime, Utc};

/// State transition accepted by [`HomeworkStore::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreAction {
    /// Replace the whole collection with a fresh fetch.
    SetAll(Vec<HomeworkItem>),
    /// Set the completion flag of one item.
    PatchCompleted { id: HomeworkId, completed: bool },
    /// Drop one item.
    Remove(HomeworkId),
}

/// One renderable card: the item plus its derived urgency class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayRow<'a> {
    pub item: &'a HomeworkItem,
    pub urgency: Urgency,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeworkStore {
    items: Vec<HomeworkItem>,
}

impl HomeworkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items in fetched order.
    pub fn items(&self) -> &[HomeworkItem] {
        &self.items
    }

    pub fn get(&self, id: HomeworkId) -> Option<&HomeworkItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Applies one action; returns whether the state changed.
    ///
    /// Actions that target an unknown id are no-ops.
    pub fn dispatch(&mut self, action: StoreAction) -> bool {
        match action {
            StoreAction::SetAll(items) => {
                let changed = self.items != items;
                self.items = items;
                changed
            }
            StoreAction::PatchCompleted { id, completed } => {
                match self.items.iter_mut().find(|item| item.id == id) {
                    Some(item) if item.completed != completed => {
                        item.completed = completed;
                        true
                    }
                    _ => false,
                }
            }
            StoreAction::Remove(id) => {
                let before = self.items.len();
                self.items.retain(|item| item.id != id);
                self.items.len() != before
            }
        }
    }

    /// Cards in display order with urgency classified against `now`.
    pub fn rows(&self, now: DateTime<Utc>) -> Vec<DisplayRow<'_>> {
        display_order(&self.items)
            .into_iter()
            .map(|item| DisplayRow {
                item,
                urgency: classify(item, now),
            })
            .collect()
    }
}
