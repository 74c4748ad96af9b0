//! Network seam between the client view-model and the homework API.
//!
//! # Responsibility
//! - Define the four calls the client makes ([`HomeworkApi`]).
//! - Implement them over HTTP/JSON with `ureq`.
//!
//! # Invariants
//! - No retries; one request per call.
//! - No timeouts beyond the HTTP library defaults.

use homework_core::{CompletionPatch, HomeworkId, HomeworkItem, NewHomework};
use log::debug;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Base URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Connection, DNS or I/O failure before a response arrived.
    Transport(String),
    /// Server answered with a non-2xx status.
    Status { status: u16, body: String },
    /// Response body did not match the expected JSON shape.
    Decode(String),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "request failed: {message}"),
            Self::Status { status, body } => write!(f, "server answered {status}: {body}"),
            Self::Decode(message) => write!(f, "unexpected response body: {message}"),
        }
    }
}

impl Error for ApiError {}

impl From<ureq::Error> for ApiError {
    fn from(value: ureq::Error) -> Self {
        match value {
            ureq::Error::Status(status, response) => Self::Status {
                status,
                body: response.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(transport) => Self::Transport(transport.to_string()),
        }
    }
}

/// Calls the client makes against the homework API.
pub trait HomeworkApi {
    /// Loads the whole collection.
    fn fetch_all(&self) -> ApiResult<Vec<HomeworkItem>>;
    /// Creates one record; the API does not return it.
    fn create(&self, draft: &NewHomework) -> ApiResult<()>;
    /// Sets the completion flag; succeeds for unknown ids too.
    fn set_completed(&self, id: HomeworkId, completed: bool) -> ApiResult<()>;
    /// Deletes one record; returns whether the server removed a row.
    fn delete(&self, id: HomeworkId) -> ApiResult<bool>;
}

#[derive(Debug, Deserialize)]
struct SuccessEnvelope {
    #[serde(default)]
    success: bool,
}

/// `ureq`-backed [`HomeworkApi`].
pub struct HttpHomeworkApi {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpHomeworkApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/homework", self.base_url)
    }

    fn item_url(&self, id: HomeworkId) -> String {
        format!("{}/homework/{id}", self.base_url)
    }
}

impl HomeworkApi for HttpHomeworkApi {
    fn fetch_all(&self) -> ApiResult<Vec<HomeworkItem>> {
        let response = self.agent.get(&self.collection_url()).call()?;
        let items: Vec<HomeworkItem> = response
            .into_json()
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        debug!("event=api_fetch module=client status=ok count={}", items.len());
        Ok(items)
    }

    fn create(&self, draft: &NewHomework) -> ApiResult<()> {
        self.agent.post(&self.collection_url()).send_json(draft)?;
        Ok(())
    }

    fn set_completed(&self, id: HomeworkId, completed: bool) -> ApiResult<()> {
        self.agent
            .request("PATCH", &self.item_url(id))
            .send_json(CompletionPatch { completed })?;
        Ok(())
    }

    fn delete(&self, id: HomeworkId) -> ApiResult<bool> {
        let response = self.agent.delete(&self.item_url(id)).call()?;
        let envelope: SuccessEnvelope = response
            .into_json()
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        Ok(envelope.success)
    }
}
