//! Sign-in, sign-up and sign-out.

use session::{ApiRequest, LOGIN_PATH, LOGOUT_PATH, SIGNUP_PATH, SessionGrant, SessionSnapshot};
use tokio::task::JoinHandle;
use wire::{AuthResponse, LogoutRequest};

use crate::error::AppError;
use crate::forms::{self, SignUpForm};
use crate::notice::Notice;
use crate::state::AppState;

pub const SIGN_IN_FAILED: &str = "Invalid email or password";
pub const SIGN_UP_FAILED: &str = "Registration failed";

/// Exchange credentials for a session, persist it and announce the login.
///
/// # Errors
///
/// Returns validation errors, the login failure, or a rejected role.
pub async fn sign_in(state: &AppState, email: &str, password: &str) -> Result<SessionSnapshot, AppError> {
    let request = forms::validate_sign_in(email, password)?;
    let response: AuthResponse = state.api.post_json(LOGIN_PATH, &request).await?;
    state.store.save(&SessionGrant::from(response))?;
    state.session.login();
    Ok(state.session.snapshot())
}

/// # Errors
///
/// Returns validation errors or the server's rejection.
pub async fn sign_up(state: &AppState, form: &SignUpForm) -> Result<Notice, AppError> {
    let request = forms::validate_sign_up(form)?;
    state.api.send(ApiRequest::post_json(SIGNUP_PATH, &request)?).await?;
    tracing::info!("account registered");
    Ok(Notice::success("Registration successful! Please sign in."))
}

/// Log out locally right away. The server is told in the background; its
/// failure is logged and never blocks the local logout.
///
/// Returns the background call, if one was started.
///
/// # Errors
///
/// Returns an error only if the local store cannot be cleared.
pub fn sign_out(state: &AppState) -> Result<Option<JoinHandle<()>>, AppError> {
    let notify = state.store.refresh_token().map(|refresh_token| {
        let api = state.api.clone();
        state.tasks.spawn(async move {
            let request = match ApiRequest::post_json(LOGOUT_PATH, &LogoutRequest { refresh_token }) {
                Ok(request) => request,
                Err(e) => {
                    tracing::warn!(error = %e, "logout request encode failed");
                    return;
                }
            };
            if let Err(e) = api.send(request).await {
                tracing::warn!(error = %e, "server logout failed; local session already cleared");
            }
        })
    });

    state.session.logout()?;
    Ok(notify)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
