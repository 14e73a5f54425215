use session::{ApiError, StorageError, StoreError, TransportError};

use crate::config::ConfigError;
use crate::forms::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// Client-side validation rejected the form; nothing was sent.
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// A route guard bounced the visitor.
    #[error("not allowed here; redirected to {to}")]
    Redirected { to: String },

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Stable process exit code per failure class.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Redirected { .. } => 3,
            Self::Api(err) if err.is_auth_failure() => 3,
            Self::Api(_) | Self::Transport(_) => 4,
            Self::Config(_) | Self::Storage(_) | Self::Store(_) | Self::Io(_) | Self::Json(_) => 1,
        }
    }
}
