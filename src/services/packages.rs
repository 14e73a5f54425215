//! Admin dancing group and special packages.

use uuid::Uuid;
use wire::{DancingPackage, SpecialPackage};

use crate::error::AppError;
use crate::forms::{self, SpecialPackageForm};
use crate::notice::Notice;
use crate::state::AppState;

pub const DANCING_PATH: &str = "/api/admin/dancing-package";
pub const SPECIAL_PATH: &str = "/api/admin/special-package";

pub const DANCING_LOAD_FAILED: &str = "Failed to load dancing packages";
pub const DANCING_DELETE_FAILED: &str = "Failed to delete package";
pub const SPECIAL_LOAD_FAILED: &str = "Failed to load packages";

/// # Errors
///
/// Returns the API error.
pub async fn list_dancing(state: &AppState) -> Result<Vec<DancingPackage>, AppError> {
    Ok(state.api.get_json(DANCING_PATH).await?)
}

/// Create when `id` is `None`, update otherwise.
///
/// # Errors
///
/// Returns validation errors or the server's rejection.
pub async fn save_dancing(
    state: &AppState,
    id: Option<Uuid>,
    name: &str,
    details: &str,
    price: Option<f64>,
) -> Result<Notice, AppError> {
    let request = forms::validate_dancing_package(name, details, price)?;
    if let Some(id) = id {
        super::put(&state.api, &format!("{DANCING_PATH}/{id}"), &request).await?;
        return Ok(Notice::success("Dancing package updated successfully"));
    }
    super::post(&state.api, DANCING_PATH, &request).await?;
    Ok(Notice::success("Dancing package created successfully"))
}

/// # Errors
///
/// Returns the API error.
pub async fn delete_dancing(state: &AppState, id: Uuid) -> Result<Notice, AppError> {
    super::delete(&state.api, &format!("{DANCING_PATH}/{id}")).await?;
    Ok(Notice::success("Dancing package deleted successfully!"))
}

/// # Errors
///
/// Returns the API error.
pub async fn list_special(state: &AppState) -> Result<Vec<SpecialPackage>, AppError> {
    Ok(state.api.get_json(SPECIAL_PATH).await?)
}

/// # Errors
///
/// Returns validation errors or the server's rejection.
pub async fn save_special(state: &AppState, id: Option<Uuid>, form: &SpecialPackageForm) -> Result<Notice, AppError> {
    let request = forms::validate_special_package(form)?;
    if let Some(id) = id {
        super::put(&state.api, &format!("{SPECIAL_PATH}/{id}"), &request).await?;
        return Ok(Notice::success("Package updated successfully"));
    }
    super::post(&state.api, SPECIAL_PATH, &request).await?;
    Ok(Notice::success("Package created successfully"))
}

/// # Errors
///
/// Returns the API error.
pub async fn delete_special(state: &AppState, id: Uuid) -> Result<Notice, AppError> {
    super::delete(&state.api, &format!("{SPECIAL_PATH}/{id}")).await?;
    Ok(Notice::success("Package deleted successfully!"))
}

#[cfg(test)]
#[path = "packages_test.rs"]
mod tests;
