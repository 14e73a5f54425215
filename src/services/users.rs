//! Admin user management.
//!
//! Deletion comes in two flavours: `deactivate` soft-deletes (the account
//! stays listed with a deactivated status) and `purge` removes it.

use uuid::Uuid;
use wire::UserSummary;

use crate::error::AppError;
use crate::forms::{self, UserForm};
use crate::notice::Notice;
use crate::state::AppState;

pub const USERS_PATH: &str = "/api/admin/users";

pub const LOAD_FAILED: &str = "Failed to load users";
pub const SOFT_DELETE_FAILED: &str = "Soft delete failed";
pub const HARD_DELETE_FAILED: &str = "Hard delete failed";

/// # Errors
///
/// Returns the API error.
pub async fn list(state: &AppState) -> Result<Vec<UserSummary>, AppError> {
    Ok(state.api.get_json(USERS_PATH).await?)
}

/// # Errors
///
/// Returns validation errors or the server's rejection.
pub async fn create(state: &AppState, form: &UserForm) -> Result<Notice, AppError> {
    let request = forms::validate_new_user(form)?;
    super::post(&state.api, USERS_PATH, &request).await?;
    Ok(Notice::success("User created successfully"))
}

/// A blank password leaves the current one in place.
///
/// # Errors
///
/// Returns validation errors or the server's rejection.
pub async fn update(state: &AppState, id: Uuid, form: &UserForm) -> Result<Notice, AppError> {
    let request = forms::validate_user_update(form)?;
    super::put(&state.api, &format!("{USERS_PATH}/{id}"), &request).await?;
    Ok(Notice::success("User updated successfully"))
}

/// # Errors
///
/// Returns the API error.
pub async fn deactivate(state: &AppState, id: Uuid) -> Result<Notice, AppError> {
    super::delete(&state.api, &format!("{USERS_PATH}/soft/{id}")).await?;
    tracing::info!(%id, "user deactivated");
    Ok(Notice::success("User deactivated"))
}

/// # Errors
///
/// Returns the API error.
pub async fn purge(state: &AppState, id: Uuid) -> Result<Notice, AppError> {
    super::delete(&state.api, &format!("{USERS_PATH}/hard/{id}")).await?;
    tracing::info!(%id, "user permanently deleted");
    Ok(Notice::success("User permanently deleted"))
}

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;
