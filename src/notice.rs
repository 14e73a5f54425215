//! Transient user notifications (the SPA's toasts).

use std::fmt;

use session::ApiError;

pub const SESSION_EXPIRED_TEXT: &str = "Session expired. Please sign in again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, text: text.into() }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, text: text.into() }
    }

    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, text: text.into() }
    }

    /// Server message verbatim when present, otherwise `fallback`.
    #[must_use]
    pub fn from_api_error(err: &ApiError, fallback: &str) -> Self {
        Self::error(err.user_message(fallback))
    }

    #[must_use]
    pub fn session_expired() -> Self {
        Self::error(SESSION_EXPIRED_TEXT)
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.kind {
            NoticeKind::Success => "ok",
            NoticeKind::Error => "error",
            NoticeKind::Info => "info",
        };
        write!(f, "[{tag}] {}", self.text)
    }
}
