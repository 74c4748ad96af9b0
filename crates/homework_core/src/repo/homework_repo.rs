//! Homework repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the single `homework` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Listing returns rows in insertion (`id`) order.
//! - Only `completed` is ever updated after insert.
//! - Read paths reject `completed` values other than `0`/`1` instead of
//!   masking them; `NULL` reads as not completed.

use crate::db::DbError;
use crate::model::homework::{HomeworkId, HomeworkItem, NewHomework};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const HOMEWORK_SELECT_SQL: &str = "SELECT
    id,
    date_created,
    date_due,
    subject,
    title,
    type,
    description,
    completed
FROM homework";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for homework persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted homework data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for homework CRUD operations.
pub trait HomeworkRepository {
    /// Returns every stored record in insertion order.
    fn list_homework(&self) -> RepoResult<Vec<HomeworkItem>>;
    /// Gets one record by id.
    fn get_homework(&self, id: HomeworkId) -> RepoResult<Option<HomeworkItem>>;
    /// Inserts a not-completed record and returns its new id.
    fn create_homework(&self, draft: &NewHomework, date_created: &str) -> RepoResult<HomeworkId>;
    /// Sets the completion flag; returns the number of rows changed.
    fn set_completed(&self, id: HomeworkId, completed: bool) -> RepoResult<usize>;
    /// Hard-deletes one record; returns whether a row was removed.
    fn delete_homework(&self, id: HomeworkId) -> RepoResult<bool>;
    /// Returns the number of stored records.
    fn count_homework(&self) -> RepoResult<u64>;
}

/// SQLite-backed homework repository.
pub struct SqliteHomeworkRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteHomeworkRepository<'conn> {
    /// Wraps a connection returned by [`crate::db::open_db`].
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl HomeworkRepository for SqliteHomeworkRepository<'_> {
    fn list_homework(&self) -> RepoResult<Vec<HomeworkItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{HOMEWORK_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();

        while let Some(row) = rows.next()? {
            items.push(parse_homework_row(row)?);
        }

        Ok(items)
    }

    fn get_homework(&self, id: HomeworkId) -> RepoResult<Option<HomeworkItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{HOMEWORK_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_homework_row(row)?));
        }

        Ok(None)
    }

    fn create_homework(&self, draft: &NewHomework, date_created: &str) -> RepoResult<HomeworkId> {
        self.conn.execute(
            "INSERT INTO homework (
                date_created,
                date_due,
                subject,
                title,
                type,
                description
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                date_created,
                draft.date_due.as_deref(),
                draft.subject.as_deref(),
                draft.title.as_deref(),
                draft.kind.as_deref(),
                draft.description.as_deref(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn set_completed(&self, id: HomeworkId, completed: bool) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "UPDATE homework SET completed = ?1 WHERE id = ?2;",
            params![bool_to_int(completed), id],
        )?;
        Ok(changed)
    }

    fn delete_homework(&self, id: HomeworkId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM homework WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }

    fn count_homework(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM homework;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count `{count}`")))
    }
}

fn parse_homework_row(row: &Row<'_>) -> RepoResult<HomeworkItem> {
    let id: HomeworkId = row.get("id")?;
    let completed = match row.get::<_, Option<i64>>("completed")? {
        None | Some(0) => false,
        Some(1) => true,
        Some(other) => {
            return Err(RepoError::InvalidData(format!(
                "invalid completed value `{other}` in homework.completed for id {id}"
            )));
        }
    };

    Ok(HomeworkItem {
        id,
        date_created: row.get("date_created")?,
        date_due: row.get("date_due")?,
        subject: row.get("subject")?,
        title: row.get("title")?,
        kind: row.get("type")?,
        description: row.get("description")?,
        completed,
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
