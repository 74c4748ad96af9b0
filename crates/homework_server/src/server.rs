//! Single-threaded HTTP server loop.
//!
//! # Responsibility
//! - Own the listener and the diary connection for the process lifetime.
//! - Decode requests, dispatch them through [`crate::routes::handle`] and
//!   write JSON responses with permissive CORS headers.
//!
//! # Invariants
//! - Requests are handled one at a time on the thread calling [`HomeworkServer::run`].
//! - Every request produces exactly one response and one `http_request` log line.

use crate::config::ServerConfig;
use crate::routes::{self, ApiResponse};
use homework_core::db::{open_db, DbError};
use homework_core::{HomeworkService, RepoError, SqliteHomeworkRepository};
use log::{info, warn};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Read;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tiny_http::{Header, Request, Response};

const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET, POST, PATCH, DELETE, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

pub type ServerResult<T> = Result<T, ServerError>;

/// Startup or serving failure.
#[derive(Debug)]
pub enum ServerError {
    Db(DbError),
    Repo(RepoError),
    Bind { addr: String, message: String },
}

impl Display for ServerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Bind { addr, message } => write!(f, "failed to bind `{addr}`: {message}"),
        }
    }
}

impl Error for ServerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Bind { .. } => None,
        }
    }
}

impl From<DbError> for ServerError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RepoError> for ServerError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Stops a running [`HomeworkServer`] from another thread.
#[derive(Clone)]
pub struct ShutdownHandle {
    http: Arc<tiny_http::Server>,
}

impl ShutdownHandle {
    /// Unblocks the accept loop; `run` returns after the in-flight request.
    pub fn shutdown(&self) {
        self.http.unblock();
    }
}

pub struct HomeworkServer {
    http: Arc<tiny_http::Server>,
    conn: Connection,
    config: ServerConfig,
}

impl HomeworkServer {
    /// Opens the configured diary database and binds the listener.
    pub fn bind(config: ServerConfig) -> ServerResult<Self> {
        let conn = open_db(&config.db_path)?;
        Self::bind_with_connection(config, conn)
    }

    /// Binds the listener over an already opened, migrated connection.
    ///
    /// Seeds sample records first when `config.seed_samples` is set.
    pub fn bind_with_connection(config: ServerConfig, conn: Connection) -> ServerResult<Self> {
        if config.seed_samples {
            HomeworkService::new(SqliteHomeworkRepository::new(&conn)).seed_samples_if_empty()?;
        }

        let http = tiny_http::Server::http(config.bind_addr.as_str()).map_err(|err| {
            ServerError::Bind {
                addr: config.bind_addr.clone(),
                message: err.to_string(),
            }
        })?;

        Ok(Self {
            http: Arc::new(http),
            conn,
            config,
        })
    }

    /// Actual listening address (useful with port `0`).
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.http.server_addr().to_ip()
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            http: Arc::clone(&self.http),
        }
    }

    /// Serves requests until a [`ShutdownHandle`] stops the loop.
    pub fn run(self) {
        let service = HomeworkService::new(SqliteHomeworkRepository::new(&self.conn))
            .strict(self.config.strict_validation);
        let addr = self
            .local_addr()
            .map_or_else(|| self.config.bind_addr.clone(), |addr| addr.to_string());
        info!(
            "event=server_start module=server status=ok addr=http://{} db_path={} strict={}",
            addr,
            self.config.db_path.display(),
            self.config.strict_validation
        );

        for request in self.http.incoming_requests() {
            serve_one(&service, request);
        }

        info!("event=server_stop module=server status=ok addr=http://{addr}");
    }
}

fn serve_one(service: &HomeworkService<SqliteHomeworkRepository<'_>>, mut request: Request) {
    let started_at = Instant::now();
    let method = request.method().to_string();
    let url = request.url().to_string();

    let mut body = Vec::new();
    let response = match request.as_reader().read_to_end(&mut body) {
        Ok(_) => routes::handle(service, &method, &url, &body),
        Err(err) => {
            warn!("event=http_request module=server status=error method={method} path={url} error_code=body_read_failed error={err}");
            ApiResponse {
                status: 400,
                body: Some(serde_json::json!({ "error": "failed to read request body" })),
            }
        }
    };

    let status = response.status;
    if let Err(err) = request.respond(to_http_response(response)) {
        warn!("event=http_request module=server status=error method={method} path={url} error_code=respond_failed error={err}");
        return;
    }

    info!(
        "event=http_request module=server status={} method={} path={} duration_ms={}",
        status,
        method,
        url,
        started_at.elapsed().as_millis()
    );
}

fn to_http_response(response: ApiResponse) -> Response<std::io::Cursor<Vec<u8>>> {
    let bytes = response
        .body
        .map(|value| value.to_string().into_bytes())
        .unwrap_or_default();
    let mut http = Response::from_data(bytes).with_status_code(response.status);

    let content_type = (response.status != 204).then_some(("Content-Type", "application/json"));
    for (name, value) in content_type.into_iter().chain(CORS_HEADERS) {
        if let Ok(header) = Header::from_bytes(name.as_bytes(), value.as_bytes()) {
            http.add_header(header);
        }
    }
    http
}
