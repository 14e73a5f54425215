//! Error types for the HTTP pipeline.

/// Failure below HTTP: the request never produced a status code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Connection refused, DNS failure, timeout, TLS error.
    #[error("network request failed: {0}")]
    Network(String),

    /// The request could not be assembled (bad URL, bad multipart part).
    #[error("request build failed: {0}")]
    Build(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

/// Why a silent refresh failed. Cloned to every queued request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RefreshError {
    #[error("no refresh token stored")]
    MissingRefreshToken,

    /// The refresh endpoint answered with a non-success status.
    #[error("refresh rejected with status {status}")]
    Rejected { status: u16 },

    #[error("refresh endpoint unreachable: {0}")]
    Unreachable(String),

    /// 2xx but no usable access token in the body.
    #[error("refresh response malformed: {0}")]
    Malformed(String),

    /// The session was logged out before or during the refresh.
    #[error("session ended before the refresh completed")]
    SessionEnded,

    /// The new token could not be persisted.
    #[error("refreshed token could not be stored: {0}")]
    Storage(String),
}

pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection and try again.";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-success status, with the server's `message` when it sent one.
    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Stored token cannot be placed in an Authorization header.
    #[error("invalid authorization header: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("request body encode failed: {0}")]
    Encode(String),

    #[error("response body decode failed: {0}")]
    Decode(String),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for 401/403, the statuses the refresh protocol reacts to.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }

    /// Text for a transient notification: the server's message verbatim,
    /// a generic network text, or `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Status { message: Some(message), .. } if !message.trim().is_empty() => message.clone(),
            Self::Transport(TransportError::Network(_)) => NETWORK_ERROR_MESSAGE.to_owned(),
            _ => fallback.to_owned(),
        }
    }

    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Status { status: 401, .. } => "E_UNAUTHORIZED",
            Self::Status { status: 403, .. } => "E_FORBIDDEN",
            Self::Status { status: 404, .. } => "E_NOT_FOUND",
            Self::Status { status: 400..=499, .. } => "E_REJECTED",
            Self::Status { .. } => "E_SERVER",
            Self::Transport(_) => "E_NETWORK",
            Self::InvalidHeader(_) => "E_INVALID_HEADER",
            Self::Encode(_) => "E_ENCODE",
            Self::Decode(_) => "E_DECODE",
        }
    }

    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport(TransportError::Network(_)) | Self::Status { status: 429 | 500..=599, .. }
        )
    }
}
