//! Client view-model: local state plus the API calls that mutate it.
//!
//! # Responsibility
//! - Keep the fetched collection in a [`HomeworkStore`].
//! - Sequence local state changes around API calls.
//!
//! # Invariants
//! - Creates are checked for required fields before anything is sent.
//! - Completion toggles are applied locally first and rolled back when the
//!   request fails.
//! - Deletes touch local state only after the server confirms removal.

use crate::api::{ApiError, HomeworkApi};
use chrono::{DateTime, Utc};
use homework_core::{
    DisplayRow, HomeworkId, HomeworkStore, HomeworkValidationError, NewHomework, StoreAction,
};
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum ViewModelError {
    /// Draft is missing required fields; nothing was sent.
    Validation(HomeworkValidationError),
    Api(ApiError),
}

impl Display for ViewModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "fill in the required fields first ({err})"),
            Self::Api(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ViewModelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Api(err) => Some(err),
        }
    }
}

impl From<ApiError> for ViewModelError {
    fn from(value: ApiError) -> Self {
        Self::Api(value)
    }
}

impl From<HomeworkValidationError> for ViewModelError {
    fn from(value: HomeworkValidationError) -> Self {
        Self::Validation(value)
    }
}

pub struct HomeworkViewModel<A: HomeworkApi> {
    api: A,
    store: HomeworkStore,
}

impl<A: HomeworkApi> HomeworkViewModel<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            store: HomeworkStore::new(),
        }
    }

    pub fn store(&self) -> &HomeworkStore {
        &self.store
    }

    /// Replaces local state with the server's full collection.
    pub fn load(&mut self) -> Result<(), ViewModelError> {
        let items = self.api.fetch_all()?;
        self.store.dispatch(StoreAction::SetAll(items));
        Ok(())
    }

    /// Validates and submits a draft, then re-fetches to pick up the new record.
    pub fn create(&mut self, draft: &NewHomework) -> Result<(), ViewModelError> {
        draft.validate()?;
        self.api.create(draft)?;
        self.load()
    }

    /// Optimistically sets the completion flag of one item.
    ///
    /// When the request fails the previous flag is restored and the error is
    /// returned.
    pub fn toggle_completed(
        &mut self,
        id: HomeworkId,
        completed: bool,
    ) -> Result<(), ViewModelError> {
        let previous = self.store.get(id).map(|item| item.completed);
        self.store.dispatch(StoreAction::PatchCompleted { id, completed });

        if let Err(err) = self.api.set_completed(id, completed) {
            if let Some(previous) = previous {
                self.store.dispatch(StoreAction::PatchCompleted {
                    id,
                    completed: previous,
                });
            }
            warn!(
                "event=toggle_completed module=client status=error id={} rolled_back={} error={}",
                id,
                previous.is_some(),
                err
            );
            return Err(err.into());
        }

        Ok(())
    }

    /// Deletes one item; local state changes only on confirmed removal.
    pub fn delete(&mut self, id: HomeworkId) -> Result<bool, ViewModelError> {
        let removed = self.api.delete(id)?;
        if removed {
            self.store.dispatch(StoreAction::Remove(id));
        }
        Ok(removed)
    }

    /// Display rows classified against `now`.
    pub fn rows(&self, now: DateTime<Utc>) -> Vec<DisplayRow<'_>> {
        self.store.rows(now)
    }
}
