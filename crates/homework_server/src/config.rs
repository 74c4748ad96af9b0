//! Server configuration.
//!
//! Values are filled by the `homework serve` command from flags and
//! `HOMEWORK_*` environment variables; [`ServerConfig::default`] mirrors the
//! stock diary setup.

use std::path::PathBuf;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
/// Default diary database file, relative to the working directory.
pub const DEFAULT_DB_FILE_NAME: &str = "mydiary.sqlite";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// `host:port` to bind; port `0` picks an ephemeral port.
    pub bind_addr: String,
    pub db_path: PathBuf,
    /// Reject creates missing `date_due`, `subject` or `title`.
    pub strict_validation: bool,
    /// Insert the sample set into an empty diary at startup.
    pub seed_samples: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            strict_validation: false,
            seed_samples: false,
        }
    }
}
