//! Admin categories and dress items.

use session::{ApiRequest, FormPart};
use uuid::Uuid;
use wire::{Category, DressItem};

use crate::error::AppError;
use crate::forms::{self, DressItemForm};
use crate::notice::Notice;
use crate::state::AppState;

pub const CATEGORIES_PATH: &str = "/api/admin/categories";
pub const DRESS_ITEMS_PATH: &str = "/api/admin/dress-items";

pub const CATEGORIES_LOAD_FAILED: &str = "Failed to load categories";
pub const DRESS_ITEMS_LOAD_FAILED: &str = "Failed to load dress items";
pub const DRESS_ITEM_SAVE_FAILED: &str = "Failed to save dress item";

// =============================================================================
// CATEGORIES
// =============================================================================

/// # Errors
///
/// Returns the API error.
pub async fn list_categories(state: &AppState) -> Result<Vec<Category>, AppError> {
    Ok(state.api.get_json(CATEGORIES_PATH).await?)
}

/// Create when `id` is `None`, update otherwise.
///
/// # Errors
///
/// Returns validation errors or the server's rejection.
pub async fn save_category(
    state: &AppState,
    id: Option<Uuid>,
    name: &str,
    description: Option<&str>,
) -> Result<Notice, AppError> {
    let request = forms::validate_category(name, description)?;
    match id {
        Some(id) => {
            super::put(&state.api, &format!("{CATEGORIES_PATH}/{id}"), &request).await?;
            Ok(Notice::success("Category updated successfully"))
        }
        None => {
            super::post(&state.api, CATEGORIES_PATH, &request).await?;
            Ok(Notice::success("Category created successfully"))
        }
    }
}

/// # Errors
///
/// Returns the API error.
pub async fn delete_category(state: &AppState, id: Uuid) -> Result<Notice, AppError> {
    super::delete(&state.api, &format!("{CATEGORIES_PATH}/{id}")).await?;
    Ok(Notice::success("Category deleted successfully"))
}

// =============================================================================
// DRESS ITEMS
// =============================================================================

/// An image file attached to a dress item.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Guess the content type from the extension; unknown types go up as
    /// `application/octet-stream`.
    #[must_use]
    pub fn new(file_name: &str, bytes: Vec<u8>) -> Self {
        let ext = file_name.rsplit_once('.').map(|(_, e)| e.to_ascii_lowercase());
        let content_type = match ext.as_deref() {
            Some("jpg" | "jpeg") => "image/jpeg",
            Some("png") => "image/png",
            Some("webp") => "image/webp",
            Some("gif") => "image/gif",
            _ => "application/octet-stream",
        };
        Self { file_name: file_name.to_owned(), content_type: content_type.to_owned(), bytes }
    }
}

/// # Errors
///
/// Returns the API error.
pub async fn list_dress_items(state: &AppState) -> Result<Vec<DressItem>, AppError> {
    Ok(state.api.get_json(DRESS_ITEMS_PATH).await?)
}

/// Multipart body: a `request` JSON part plus an optional `image` part.
///
/// # Errors
///
/// Returns validation errors or the server's rejection.
pub async fn save_dress_item(
    state: &AppState,
    id: Option<Uuid>,
    form: &DressItemForm,
    image: Option<ImageUpload>,
) -> Result<Notice, AppError> {
    let request = forms::validate_dress_item(form)?;
    let mut parts = vec![FormPart::json("request", &request)?];
    if let Some(image) = image {
        parts.push(FormPart::file("image", &image.file_name, &image.content_type, image.bytes));
    }

    let (req, done) = match id {
        Some(id) => (
            ApiRequest::new(reqwest::Method::PUT, format!("{DRESS_ITEMS_PATH}/{id}")),
            "Dress item updated successfully",
        ),
        None => (ApiRequest::new(reqwest::Method::POST, DRESS_ITEMS_PATH), "Dress item created successfully"),
    };
    state.api.send(req.with_multipart(parts)).await?;
    Ok(Notice::success(done))
}

/// # Errors
///
/// Returns the API error.
pub async fn delete_dress_item(state: &AppState, id: Uuid) -> Result<Notice, AppError> {
    super::delete(&state.api, &format!("{DRESS_ITEMS_PATH}/{id}")).await?;
    Ok(Notice::success("Dress item deleted successfully"))
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
