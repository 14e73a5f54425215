//! Client configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use session::transport::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const SESSION_DIR_NAME: &str = ".rajawarama";
pub const SESSION_FILE_NAME: &str = "session.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse failed: {0}")]
    Parse(String),
    #[error("cannot locate session file: set RAJAWARAMA_SESSION_FILE or HOME")]
    NoSessionPath,
}

/// Where the token store keeps its five keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStore {
    /// Lost when the process exits, like a tab-scoped store.
    Memory,
    /// Survives restarts.
    File(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Timeouts {
    #[must_use]
    pub fn request(self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    #[must_use]
    pub fn connect(self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub session_store: SessionStore,
    pub timeouts: Timeouts,
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `RAJAWARAMA_API_BASE_URL`: default `http://localhost:8080`
    /// - `RAJAWARAMA_SESSION_STORE`: `file` (default) or `memory`
    /// - `RAJAWARAMA_SESSION_FILE`: default `$HOME/.rajawarama/session.json`
    /// - `RAJAWARAMA_REQUEST_TIMEOUT_SECS`: default 30
    /// - `RAJAWARAMA_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown store kind, or when the file store is
    /// selected and no path can be derived.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url = normalize_base_url(
            &std::env::var("RAJAWARAMA_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_owned()),
        );
        let session_store = match std::env::var("RAJAWARAMA_SESSION_STORE").ok().as_deref().unwrap_or("file") {
            "memory" => SessionStore::Memory,
            "file" => SessionStore::File(session_file_from_env()?),
            other => {
                return Err(ConfigError::Parse(format!(
                    "unknown RAJAWARAMA_SESSION_STORE '{other}' (expected 'file' or 'memory')"
                )));
            }
        };
        let timeouts = Timeouts {
            request_secs: env_parse_u64("RAJAWARAMA_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("RAJAWARAMA_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { api_base_url, session_store, timeouts })
    }

    /// Replace the base URL (command-line flag beats environment).
    #[must_use]
    pub fn with_base_url(mut self, base_url: Option<&str>) -> Self {
        if let Some(url) = base_url {
            self.api_base_url = normalize_base_url(url);
        }
        self
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

fn session_file_from_env() -> Result<PathBuf, ConfigError> {
    if let Some(path) = std::env::var_os("RAJAWARAMA_SESSION_FILE").filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    let home = std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .ok_or(ConfigError::NoSessionPath)?;
    Ok(PathBuf::from(home).join(SESSION_DIR_NAME).join(SESSION_FILE_NAME))
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
