//! Homework domain model.
//!
//! # Responsibility
//! - Define the single persisted record and its wire payloads.
//! - Own required-field checks and completion-flag coercion.
//!
//! # Invariants
//! - `id` is assigned by storage and never reused for another record.
//! - `date_created` is stamped once at insert time and never rewritten.
//! - `completed` is persisted as `0`/`1`; readers accept bool or integer.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned identifier of a homework record.
pub type HomeworkId = i64;

/// One homework record as stored in the `homework` table.
///
/// Text columns are nullable because the API accepts incomplete payloads;
/// only the client insists on `date_due`, `subject` and `title`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeworkItem {
    pub id: HomeworkId,
    /// RFC 3339 UTC timestamp set by the server on insert.
    pub date_created: Option<String>,
    /// Deadline, normally `YYYY-MM-DD`.
    pub date_due: Option<String>,
    pub subject: Option<String>,
    pub title: Option<String>,
    /// Serialized as `type` to match the table column.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub completed: bool,
}

/// Creation payload accepted by `POST /homework`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHomework {
    #[serde(default)]
    pub date_due: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `PATCH /homework/{id}`.
///
/// `completed` is coerced with truthiness rules, so `1`, `"yes"` and `true`
/// all mark the record done while `null`, `0`, `""` and `false` clear it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionPatch {
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub completed: bool,
}

/// Field the client must fill before submitting a new record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    DateDue,
    Subject,
    Title,
}

impl RequiredField {
    /// Wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DateDue => "date_due",
            Self::Subject => "subject",
            Self::Title => "title",
        }
    }
}

/// Creation payload is missing one or more required fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkValidationError {
    pub missing: Vec<RequiredField>,
}

impl Display for HomeworkValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let names = self
            .missing
            .iter()
            .map(|field| field.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "missing required fields: {names}")
    }
}

impl Error for HomeworkValidationError {}

impl NewHomework {
    /// Returns required fields that are absent or empty, in form order.
    pub fn missing_required(&self) -> Vec<RequiredField> {
        [
            (RequiredField::DateDue, &self.date_due),
            (RequiredField::Subject, &self.subject),
            (RequiredField::Title, &self.title),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
        .map(|(field, _)| field)
        .collect()
    }

    /// Checks that `date_due`, `subject` and `title` are all non-empty.
    pub fn validate(&self) -> Result<(), HomeworkValidationError> {
        let missing = self.missing_required();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(HomeworkValidationError { missing })
        }
    }
}

/// Applies loose truthiness to a JSON value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().is_some_and(is_truthy))
}
