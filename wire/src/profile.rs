//! Self-service profile payloads for `/api/profile`.

use serde::{Deserialize, Serialize};

/// `GET /api/profile` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: String,
    /// Backend `LocalDateTime`, kept verbatim.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// `PUT /api/profile` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub full_name: String,
    pub phone: String,
}

/// `PUT /api/profile/password` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}
