//! Admin user management payloads for `/api/admin/users`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::role::Role;

/// One row of the admin user list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub user_id: Uuid,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: Role,
    /// Soft-deleted (deactivated) accounts. Jackson emits this as
    /// `deleted`; some builds kept the `isDeleted` field name.
    #[serde(default, alias = "isDeleted")]
    pub deleted: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_login: Option<String>,
}

/// `POST /api/admin/users` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// `PUT /api/admin/users/{id}` body. An empty password is never sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub full_name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}
