use session::{ApiError, TransportError};

use super::*;
use crate::forms;
use crate::notice::NoticeKind;

#[test]
fn server_message_beats_fallback() {
    let err = AppError::Api(ApiError::Status { status: 409, message: Some("Email already in use".to_owned()) });
    assert_eq!(failure_notice(&err, "Operation failed", false).text, "Email already in use");
}

#[test]
fn lost_session_reads_as_expired() {
    let err = AppError::Api(ApiError::Status { status: 401, message: Some("Unauthorized".to_owned()) });
    assert_eq!(failure_notice(&err, "Failed to load users", true), Notice::session_expired());
    // Same status while the session survives is an ordinary failure.
    assert_eq!(failure_notice(&err, "Failed to load users", false).text, "Unauthorized");
}

#[test]
fn network_failures_use_generic_text() {
    let wrapped = AppError::Api(ApiError::Transport(TransportError::Network("refused".to_owned())));
    let bare = AppError::Transport(TransportError::Network("refused".to_owned()));
    for err in [wrapped, bare] {
        assert_eq!(failure_notice(&err, "Delete failed", false).text, session::error::NETWORK_ERROR_MESSAGE);
    }
}

#[test]
fn validation_shows_first_message() {
    let err = AppError::Validation(forms::validate_sign_in("", "").expect_err("blank"));
    assert_eq!(failure_notice(&err, "Invalid email or password", false).text, "Email is required");
}

#[test]
fn redirect_is_informational() {
    let err = AppError::Redirected { to: "/signin".to_owned() };
    let notice = failure_notice(&err, "ignored", false);
    assert_eq!(notice.kind, NoticeKind::Info);
    assert!(notice.text.contains("/signin"));
}
