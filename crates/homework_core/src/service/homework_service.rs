//! Homework use-case service.
//!
//! # Responsibility
//! - Provide list/create/complete/delete entry points for API callers.
//! - Stamp creation time and optionally enforce required fields.
//! - Seed sample records into an empty diary on request.
//!
//! # Invariants
//! - `date_created` comes from the service clock, never from the payload.
//! - Completion updates succeed whether or not a row matched.
//! - Service layer remains storage-agnostic.

use crate::model::homework::{
    HomeworkId, HomeworkItem, HomeworkValidationError, NewHomework,
};
use crate::repo::homework_repo::{HomeworkRepository, RepoError, RepoResult};
use chrono::{DateTime, SecondsFormat, Utc};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Clock used to stamp `date_created`.
pub type Clock = fn() -> DateTime<Utc>;

/// (date_due, subject, title, type, description)
const SAMPLE_HOMEWORK: [(&str, &str, &str, &str, &str); 5] = [
    (
        "2025-10-05",
        "Mathematics",
        "Derivative problems",
        "Practice",
        "Solve every problem from section 12.",
    ),
    (
        "2025-10-04",
        "Literature",
        "Essay",
        "Creative",
        "Write an essay on the topic 'My favourite season'.",
    ),
    (
        "2025-10-06",
        "Physics",
        "Lab work",
        "Practice",
        "Complete the lab on Newton's laws.",
    ),
    (
        "2025-10-07",
        "History",
        "Chapter summary",
        "Theory",
        "Summarise the chapter on the Second World War.",
    ),
    (
        "2025-10-05",
        "Computer Science",
        "Project",
        "Practice",
        "Build a small app for tracking tasks.",
    ),
];

/// Service error for homework use-cases.
#[derive(Debug)]
pub enum HomeworkServiceError {
    /// Strict mode rejected a payload with missing required fields.
    Validation(HomeworkValidationError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for HomeworkServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for HomeworkServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for HomeworkServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<HomeworkValidationError> for HomeworkServiceError {
    fn from(value: HomeworkValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Use-case service wrapper over a homework repository.
pub struct HomeworkService<R: HomeworkRepository> {
    repo: R,
    clock: Clock,
    strict_validation: bool,
}

impl<R: HomeworkRepository> HomeworkService<R> {
    /// Creates a lenient service stamping records with wall-clock UTC time.
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, Utc::now)
    }

    /// Creates a service with a caller-provided clock.
    pub fn with_clock(repo: R, clock: Clock) -> Self {
        Self {
            repo,
            clock,
            strict_validation: false,
        }
    }

    /// Enables or disables server-side required-field checks on create.
    pub fn strict(mut self, enabled: bool) -> Self {
        self.strict_validation = enabled;
        self
    }

    /// Lists every record in insertion order.
    pub fn list_homework(&self) -> RepoResult<Vec<HomeworkItem>> {
        self.repo.list_homework()
    }

    /// Gets one record by id.
    pub fn get_homework(&self, id: HomeworkId) -> RepoResult<Option<HomeworkItem>> {
        self.repo.get_homework(id)
    }

    /// Creates one not-completed record stamped with the current time.
    ///
    /// # Errors
    /// - `Validation` in strict mode when `date_due`, `subject` or `title`
    ///   is missing.
    /// - `Repo` when the insert fails.
    pub fn create_homework(&self, draft: &NewHomework) -> Result<HomeworkId, HomeworkServiceError> {
        if self.strict_validation {
            draft.validate()?;
        }

        let date_created = format_timestamp((self.clock)());
        let id = self.repo.create_homework(draft, &date_created)?;
        info!("event=homework_create module=service status=ok id={id}");
        Ok(id)
    }

    /// Sets the completion flag of one record.
    ///
    /// A missing id is not an error; nothing changes and `Ok(())` is returned.
    pub fn set_completion(&self, id: HomeworkId, completed: bool) -> RepoResult<()> {
        let changed = self.repo.set_completed(id, completed)?;
        debug!(
            "event=homework_set_completion module=service status=ok id={id} completed={completed} matched={changed}"
        );
        Ok(())
    }

    /// Deletes one record; returns whether a row was removed.
    pub fn delete_homework(&self, id: HomeworkId) -> RepoResult<bool> {
        let removed = self.repo.delete_homework(id)?;
        info!("event=homework_delete module=service status=ok id={id} removed={removed}");
        Ok(removed)
    }

    /// Inserts the sample set when the diary is empty.
    ///
    /// Returns the number of inserted records (`0` for a non-empty diary).
    pub fn seed_samples_if_empty(&self) -> RepoResult<usize> {
        if self.repo.count_homework()? > 0 {
            return Ok(0);
        }

        let date_created = format_timestamp((self.clock)());
        for (date_due, subject, title, kind, description) in SAMPLE_HOMEWORK {
            let draft = NewHomework {
                date_due: Some(date_due.to_string()),
                subject: Some(subject.to_string()),
                title: Some(title.to_string()),
                kind: Some(kind.to_string()),
                description: Some(description.to_string()),
            };
            self.repo.create_homework(&draft, &date_created)?;
        }

        info!(
            "event=homework_seed module=service status=ok inserted={}",
            SAMPLE_HOMEWORK.len()
        );
        Ok(SAMPLE_HOMEWORK.len())
    }
}

/// Formats a creation timestamp as RFC 3339 UTC with millisecond precision.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
