//! Shared REST wire models for the Rajawarama back office API.
//!
//! This crate owns the JSON representation of every request and response
//! the client exchanges with the backend. Field names follow the backend's
//! camelCase convention; Rust fields stay snake_case via serde renames.

pub mod auth;
pub mod catalog;
pub mod packages;
pub mod profile;
pub mod role;
pub mod users;

pub use auth::{AuthResponse, LoginRequest, LogoutRequest, MessageResponse, RefreshRequest, SignUpRequest};
pub use catalog::{Category, CategoryRequest, DressItem, DressItemRequest};
pub use packages::{DancingPackage, DancingPackageRequest, SpecialPackage, SpecialPackageRequest};
pub use profile::{ChangePasswordRequest, Profile, UpdateProfileRequest};
pub use role::{Role, RoleParseError};
pub use users::{CreateUserRequest, UpdateUserRequest, UserSummary};

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
