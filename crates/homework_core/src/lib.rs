//! Core domain logic for the homework diary.
//! This crate is the single source of truth for record invariants, storage
//! and the client-side derivations (display order, urgency).

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::homework::{
    CompletionPatch, HomeworkId, HomeworkItem, HomeworkValidationError, NewHomework,
    RequiredField,
};
pub use repo::homework_repo::{
    HomeworkRepository, RepoError, RepoResult, SqliteHomeworkRepository,
};
pub use service::homework_service::{HomeworkService, HomeworkServiceError};
pub use view::store::{DisplayRow, HomeworkStore, StoreAction};
pub use view::urgency::{classify, Urgency};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
