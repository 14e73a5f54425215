use reqwest::Method;
use serde_json::json;
use wire::Role;

use super::*;
use crate::services::{failure_notice, fake};

fn form(password: Option<&str>) -> UserForm {
    UserForm {
        full_name: "Nimal Perera".to_owned(),
        email: "nimal@example.lk".to_owned(),
        phone: "0712345678".to_owned(),
        password: password.map(str::to_owned),
        role: Role::Customer,
    }
}

#[tokio::test]
async fn list_reads_deactivated_flag() {
    let (state, backend) = fake::signed_in("ADMIN");
    backend.on(
        Method::GET,
        USERS_PATH,
        200,
        json!([
            { "userId": "6f1c1c1e-2d1a-4d55-9d0e-0c7b9a7d3f10", "email": "a@example.lk", "fullName": "A", "role": "ADMIN" },
            { "userId": "7a2d2d2f-3e2b-4e66-8e1f-1d8cab8e4a21", "email": "b@example.lk", "fullName": "B", "role": "CUSTOMER", "isDeleted": true }
        ]),
    );

    let users = list(&state).await.expect("list");
    assert_eq!(users.len(), 2);
    assert!(!users[0].deleted);
    assert!(users[1].deleted);
}

#[tokio::test]
async fn create_requires_password() {
    let (state, backend) = fake::signed_in("ADMIN");
    let err = create(&state, &form(None)).await.expect_err("no password");
    assert_eq!(failure_notice(&err, "Operation failed", false).text, "Password must be at least 8 characters");
    assert!(backend.recorded().is_empty());
}

#[tokio::test]
async fn create_posts_role() {
    let (state, backend) = fake::signed_in("ADMIN");
    backend.on(Method::POST, USERS_PATH, 201, json!({}));

    let notice = create(&state, &form(Some("secret-pass"))).await.expect("created");
    assert_eq!(notice.text, "User created successfully");
    let body = backend.last().json();
    assert_eq!(body["role"], "CUSTOMER");
    assert_eq!(body["password"], "secret-pass");
}

#[tokio::test]
async fn update_with_blank_password_omits_it() {
    let (state, backend) = fake::signed_in("ADMIN");
    let id = Uuid::new_v4();
    backend.on(Method::PUT, &format!("{USERS_PATH}/{id}"), 200, json!({}));

    update(&state, id, &form(Some(""))).await.expect("updated");
    let body = backend.last().json();
    assert!(body.get("password").is_none());
    assert_eq!(body["fullName"], "Nimal Perera");
}

#[tokio::test]
async fn deactivate_and_purge_use_distinct_paths() {
    let (state, backend) = fake::signed_in("ADMIN");
    let id = Uuid::new_v4();
    backend.on(Method::DELETE, &format!("{USERS_PATH}/soft/{id}"), 200, json!({}));
    backend.on(Method::DELETE, &format!("{USERS_PATH}/hard/{id}"), 200, json!({}));

    assert_eq!(deactivate(&state, id).await.expect("soft").text, "User deactivated");
    assert_eq!(purge(&state, id).await.expect("hard").text, "User permanently deleted");

    let paths: Vec<_> = backend.recorded().into_iter().map(|r| r.path).collect();
    assert_eq!(paths, [format!("{USERS_PATH}/soft/{id}"), format!("{USERS_PATH}/hard/{id}")]);
}

#[tokio::test]
async fn customer_token_rejected_without_refresh_loop() {
    let (state, backend) = fake::signed_in("CUSTOMER");
    backend.on(Method::GET, USERS_PATH, 403, json!({ "message": "Forbidden" }));
    backend.on(
        Method::POST,
        session::REFRESH_PATH,
        200,
        json!({ "accessToken": "A2", "refreshToken": "R2" }),
    );

    let err = list(&state).await.expect_err("still forbidden");
    assert!(matches!(err, AppError::Api(ref api) if api.status() == Some(403)));
    // One original call, one refresh, one retry.
    assert_eq!(backend.recorded().len(), 3);
    assert_eq!(state.store.access_token().as_deref(), Some("A2"));
}
