//! The signed-in user's own profile.

use wire::Profile;

use crate::error::AppError;
use crate::forms;
use crate::notice::Notice;
use crate::state::AppState;

pub const PROFILE_PATH: &str = "/api/profile";
pub const PASSWORD_PATH: &str = "/api/profile/password";

pub const UPDATE_FAILED: &str = "Failed to update profile";
pub const PASSWORD_FAILED: &str = "Failed to change password!";
pub const DELETE_FAILED: &str = "Failed to delete account";

/// # Errors
///
/// Returns the API error; a failed refresh surfaces as the original 401/403.
pub async fn fetch(state: &AppState) -> Result<Profile, AppError> {
    Ok(state.api.get_json(PROFILE_PATH).await?)
}

/// # Errors
///
/// Returns validation errors or the server's rejection.
pub async fn update(state: &AppState, full_name: &str, phone: &str) -> Result<Notice, AppError> {
    let request = forms::validate_profile(full_name, phone)?;
    super::put(&state.api, PROFILE_PATH, &request).await?;
    Ok(Notice::success("Profile updated successfully"))
}

/// # Errors
///
/// Returns validation errors or the server's rejection.
pub async fn change_password(state: &AppState, current: &str, new: &str, confirm: &str) -> Result<Notice, AppError> {
    let request = forms::validate_password_change(current, new, confirm)?;
    super::put(&state.api, PASSWORD_PATH, &request).await?;
    Ok(Notice::success("Password updated successfully"))
}

/// Delete the account, then drop the local session and go to sign-in.
///
/// # Errors
///
/// Returns the server's rejection; the session is kept in that case.
pub async fn delete_account(state: &AppState) -> Result<Notice, AppError> {
    super::delete(&state.api, PROFILE_PATH).await?;
    state.session.logout()?;
    state.navigator.redirect_to_sign_in(None);
    tracing::info!("account deleted");
    Ok(Notice::success("Account deleted successfully"))
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
