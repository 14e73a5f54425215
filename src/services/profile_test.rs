use reqwest::Method;
use serde_json::json;
use session::REFRESH_PATH;

use super::*;
use crate::services::fake;

#[tokio::test]
async fn fetch_sends_bearer_token() {
    let (state, backend) = fake::signed_in("CUSTOMER");
    backend.on(
        Method::GET,
        PROFILE_PATH,
        200,
        json!({ "email": "amali@example.lk", "fullName": "Amali Fernando", "phone": "0771234567", "role": "CUSTOMER" }),
    );

    let profile = fetch(&state).await.expect("profile");
    assert_eq!(profile.full_name, "Amali Fernando");
    assert_eq!(backend.last().bearer.as_deref(), Some("A1"));
}

#[tokio::test]
async fn fetch_after_failed_refresh_reports_expired_session() {
    let (state, backend) = fake::signed_in("CUSTOMER");
    backend.on(Method::GET, PROFILE_PATH, 401, json!({}));
    backend.on(Method::POST, REFRESH_PATH, 401, json!({ "message": "Refresh token expired" }));

    let err = fetch(&state).await.expect_err("refresh failed");
    let lost = !state.store.is_authenticated();
    assert!(lost);
    assert_eq!(crate::services::failure_notice(&err, "Failed", lost), crate::notice::Notice::session_expired());
    assert_eq!(state.navigator.current().path, "/signin");
}

#[tokio::test]
async fn update_trims_and_puts_profile() {
    let (state, backend) = fake::signed_in("CUSTOMER");
    backend.on(Method::PUT, PROFILE_PATH, 200, json!({ "message": "Profile updated successfully" }));

    let notice = update(&state, " Amali F ", "+94771234567").await.expect("updated");
    assert_eq!(notice.text, "Profile updated successfully");
    assert_eq!(backend.last().json(), json!({ "fullName": "Amali F", "phone": "+94771234567" }));
}

#[tokio::test]
async fn change_password_rejects_mismatch_locally() {
    let (state, backend) = fake::signed_in("CUSTOMER");
    let err = change_password(&state, "old-pass", "new-password", "other-password").await.expect_err("mismatch");
    assert!(matches!(err, AppError::Validation(_)));
    assert!(backend.recorded().is_empty());
}

#[tokio::test]
async fn change_password_surfaces_server_message() {
    let (state, backend) = fake::signed_in("CUSTOMER");
    backend.on(Method::PUT, PASSWORD_PATH, 400, json!({ "message": "Current password is incorrect" }));

    let err = change_password(&state, "old-pass", "new-password", "new-password").await.expect_err("400");
    assert_eq!(crate::services::failure_notice(&err, PASSWORD_FAILED, false).text, "Current password is incorrect");
    assert!(state.store.is_authenticated());
}

#[tokio::test]
async fn delete_account_signs_out() {
    let (state, backend) = fake::signed_in("CUSTOMER");
    backend.on(Method::DELETE, PROFILE_PATH, 200, json!({ "message": "Account deleted successfully" }));

    delete_account(&state).await.expect("deleted");
    assert!(!state.store.is_authenticated());
    assert_eq!(state.navigator.current().path, "/signin");
}
