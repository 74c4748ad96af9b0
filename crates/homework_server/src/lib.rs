//! HTTP/JSON API over the homework diary core.
//!
//! # Responsibility
//! - Expose list/create/complete/delete as `/homework` routes.
//! - Keep transport concerns (sockets, headers, CORS) out of core.
//!
//! # Invariants
//! - Handlers never panic on client input; bad input maps to 4xx.
//! - Storage failures are logged and answered with 500.

pub mod config;
pub mod routes;
pub mod server;

pub use config::{ServerConfig, DEFAULT_BIND_ADDR, DEFAULT_DB_FILE_NAME};
pub use routes::{handle, ApiResponse};
pub use server::{HomeworkServer, ServerError, ServerResult, ShutdownHandle};
