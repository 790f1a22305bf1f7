use std::{env, path::PathBuf, time::Duration};

use thiserror::Error;

/// Default connection string: a `shelf.db` file in the working directory.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:///./shelf.db";

const SQLITE_SCHEME: &str = "sqlite://";

/// Errors in storage configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("DATABASE_URL is empty")]
    EmptyDatabaseUrl,
    #[error("in-memory databases are not supported: every request opens its own session")]
    InMemoryDatabase,
    #[error("unsupported database URL '{0}': expected sqlite:///<path> or a file path")]
    UnsupportedDatabaseUrl(String),
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection string (default: "sqlite:///./shelf.db")
    pub database_url: String,
    /// How long a session waits on a locked database, in milliseconds (default: 5,000)
    pub busy_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DATABASE_URL` - SQLite connection string (default: "sqlite:///./shelf.db")
    /// - `SQLITE_BUSY_TIMEOUT_MS` - Lock wait in milliseconds (default: 5,000)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            busy_timeout_ms: lookup("SQLITE_BUSY_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(5_000),
        }
    }

    /// Get the busy timeout as a Duration.
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    /// Resolve the connection string to a database file path.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        parse_database_url(&self.database_url)
    }
}

/// Parse a SQLite connection string into a file path.
///
/// Accepts `sqlite:///relative.db`, `sqlite:////absolute.db` (everything after
/// the third slash is the path) or a bare filesystem path.
pub fn parse_database_url(url: &str) -> Result<PathBuf, ConfigError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ConfigError::EmptyDatabaseUrl);
    }

    let path = match url.strip_prefix(SQLITE_SCHEME) {
        Some("") => return Err(ConfigError::InMemoryDatabase),
        Some(rest) => rest
            .strip_prefix('/')
            .ok_or_else(|| ConfigError::UnsupportedDatabaseUrl(url.to_string()))?,
        None if url.contains("://") => {
            return Err(ConfigError::UnsupportedDatabaseUrl(url.to_string()))
        }
        None => url,
    };

    match path {
        "" | ":memory:" => Err(ConfigError::InMemoryDatabase),
        path => Ok(PathBuf::from(path)),
    }
}
