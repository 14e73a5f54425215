use clap::Parser;
use reqwest::Method;
use serde_json::json;

use super::*;
use crate::cli::Cli;
use crate::services::fake;

fn parse(args: &[&str]) -> Command {
    let argv = std::iter::once("rajawarama").chain(args.iter().copied());
    Cli::try_parse_from(argv).expect("parse").command
}

#[tokio::test]
async fn guest_is_bounced_from_profile_with_return_to() {
    let (state, backend) = fake::app();

    let err = run(&state, parse(&["profile", "show"])).await.expect_err("guest");
    assert!(matches!(err, AppError::Redirected { ref to } if to == "/signin"));
    assert_eq!(state.navigator.current().return_to.as_deref(), Some("/profile"));
    assert!(backend.recorded().is_empty());
}

#[tokio::test]
async fn customer_cannot_reach_admin_screens() {
    let (state, backend) = fake::signed_in("CUSTOMER");

    let err = run(&state, parse(&["admin", "users", "list"])).await.expect_err("customer");
    assert_eq!(err.exit_code(), 3);
    assert!(backend.recorded().is_empty());
}

#[tokio::test]
async fn admin_lists_users_through_guard() {
    let (state, backend) = fake::signed_in("ADMIN");
    backend.on(Method::GET, users::USERS_PATH, 200, json!([]));

    run(&state, parse(&["admin", "users", "list", "--status", "active"])).await.expect("listed");
    assert_eq!(state.navigator.current().path, "/admin/users");
    assert_eq!(backend.last().bearer.as_deref(), Some("A1"));
}

#[tokio::test]
async fn enter_allows_public_routes() {
    let (state, _backend) = fake::app();
    enter(&state, "/packages").expect("public");
    assert_eq!(state.navigator.current().path, "/packages");
}

#[tokio::test]
async fn signout_waits_for_server_then_goes_home() {
    let (state, backend) = fake::signed_in("ADMIN");
    backend.on(Method::POST, session::LOGOUT_PATH, 200, json!({}));
    state.navigator.navigate("/admin");

    run(&state, Command::Signout).await.expect("signed out");
    assert!(!state.store.is_authenticated());
    assert_eq!(state.navigator.current().path, "/");
    assert_eq!(backend.last().path, session::LOGOUT_PATH);
}

#[tokio::test]
async fn whoami_describes_each_viewer() {
    let (state, _backend) = fake::signed_in("ADMIN");
    assert_eq!(describe_viewer(&state), "Amali Fernando <amali@example.lk> (admin)");
    let (customer, _backend) = fake::signed_in("CUSTOMER");
    assert_eq!(describe_viewer(&customer), "Amali Fernando <amali@example.lk> (customer)");
    let (guest, _backend) = fake::app();
    assert_eq!(describe_viewer(&guest), "guest");
}

#[test]
fn fallbacks_follow_the_screen() {
    assert_eq!(parse(&["admin", "users", "purge", "6f1c1c1e-2d1a-4d55-9d0e-0c7b9a7d3f10"]).fallback(), "Hard delete failed");
    assert_eq!(parse(&["admin", "dancing-packages", "list"]).fallback(), "Failed to load dancing packages");
    assert_eq!(
        parse(&["signin", "--email", "a@example.lk", "--password", "x"]).fallback(),
        "Invalid email or password"
    );
}
