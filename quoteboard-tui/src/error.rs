//! Error types for the TUI.

use crate::config::ConfigError;
use quoteboard_storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum TuiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Logging setup failed: {0}")]
    Telemetry(String),
}
