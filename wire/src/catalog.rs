//! Dress catalog payloads: categories and dress items.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A dress category as returned by `/api/admin/categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub category_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Create/update body for a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A rentable dress item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DressItem {
    pub dress_item_id: Uuid,
    pub dress_item_name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Absolute image URL served by the backend.
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub quantity_adult: Option<i32>,
    #[serde(default)]
    pub quantity_page_boys: Option<i32>,
    pub category_id: Uuid,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// JSON `request` part of the multipart dress item create/update call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DressItemRequest {
    pub dress_item_name: String,
    pub description: String,
    pub quantity_adult: i32,
    pub quantity_page_boys: i32,
    pub category_id: Uuid,
}
