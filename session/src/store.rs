//! Token store: the only reader/writer of persisted session fields.
//!
//! SYSTEM CONTEXT
//! ==============
//! The HTTP client (token attach + refresh) and the session context
//! (login/logout) are the sole writers. Everything else reads snapshots.
//! Five flat keys are persisted; `role` is constrained to [`Role`].

use wire::{AuthResponse, Role};

use crate::storage::{ForeignChanges, StorageError, StorageHandle};

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const ROLE_KEY: &str = "role";
pub const EMAIL_KEY: &str = "email";
pub const FULL_NAME_KEY: &str = "fullName";

/// Access-token key used by older builds of the web client.
pub const LEGACY_TOKEN_KEY: &str = "token";

pub const SESSION_KEYS: [&str; 5] = [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, ROLE_KEY, EMAIL_KEY, FULL_NAME_KEY];

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid role {0:?}; expected ADMIN or CUSTOMER")]
    InvalidRole(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Session fields as issued by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionGrant {
    pub access_token: String,
    pub refresh_token: String,
    /// Unvalidated role name as received from the server.
    pub role: String,
    pub email: String,
    pub full_name: String,
}

impl From<AuthResponse> for SessionGrant {
    fn from(resp: AuthResponse) -> Self {
        Self {
            access_token: resp.access_token,
            refresh_token: resp.refresh_token.unwrap_or_default(),
            role: resp.role.unwrap_or_default(),
            email: resp.email.unwrap_or_default(),
            full_name: resp.full_name.unwrap_or_default(),
        }
    }
}

/// Everything currently persisted, read in one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredSession {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub role: Option<Role>,
    pub email: Option<String>,
    pub full_name: Option<String>,
}

impl StoredSession {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

#[derive(Clone)]
pub struct TokenStore {
    storage: StorageHandle,
}

impl TokenStore {
    #[must_use]
    pub fn new(storage: StorageHandle) -> Self {
        Self { storage }
    }

    /// Persist a freshly issued session.
    ///
    /// The role is validated before anything is written and the five keys
    /// land in one storage write, so a rejected grant or a failed write
    /// leaves the previous session untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidRole`] for roles outside ADMIN/CUSTOMER,
    /// or a storage error if a write fails.
    pub fn save(&self, grant: &SessionGrant) -> Result<(), StoreError> {
        let role: Role = grant.role.parse().map_err(|_| {
            tracing::error!(role = %grant.role, "refusing to store session with invalid role");
            StoreError::InvalidRole(grant.role.clone())
        })?;

        self.storage
            .set_many(&[
                (ACCESS_TOKEN_KEY, &grant.access_token),
                (REFRESH_TOKEN_KEY, &grant.refresh_token),
                (ROLE_KEY, role.as_str()),
                (EMAIL_KEY, &grant.email),
                (FULL_NAME_KEY, &grant.full_name),
            ])
            .map_err(|e| {
                tracing::error!(error = %e, "failed to persist session; previous session kept");
                StoreError::from(e)
            })
    }

    /// Remove every session field. Safe to call when already empty.
    ///
    /// # Errors
    ///
    /// Returns the first storage error; later keys are still attempted.
    pub fn clear(&self) -> Result<(), StoreError> {
        let mut first_err = None;
        for key in SESSION_KEYS {
            if let Err(e) = self.storage.remove(key) {
                tracing::error!(key, error = %e, "failed to clear session key");
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), |e| Err(e.into()))
    }

    /// Replace the access token after a silent refresh, plus the refresh
    /// token when the server rotated it.
    ///
    /// # Errors
    ///
    /// Returns a storage error if a write fails.
    pub fn update_tokens(&self, access_token: &str, rotated_refresh: Option<&str>) -> Result<(), StoreError> {
        match rotated_refresh.filter(|r| !r.is_empty() && self.refresh_token().as_deref() != Some(*r)) {
            Some(refresh) => self
                .storage
                .set_many(&[(ACCESS_TOKEN_KEY, access_token), (REFRESH_TOKEN_KEY, refresh)])?,
            None => self.storage.set(ACCESS_TOKEN_KEY, access_token)?,
        }
        Ok(())
    }

    /// Move a legacy `token` entry to `accessToken`. Returns whether a
    /// migration happened.
    ///
    /// # Errors
    ///
    /// Returns a storage error if a write fails.
    pub fn migrate_legacy(&self) -> Result<bool, StoreError> {
        let Some(legacy) = self.storage.get(LEGACY_TOKEN_KEY) else {
            return Ok(false);
        };
        if self.access_token().is_none() && !legacy.is_empty() {
            self.storage.set(ACCESS_TOKEN_KEY, &legacy)?;
        }
        self.storage.remove(LEGACY_TOKEN_KEY)?;
        tracing::info!("migrated legacy session token key");
        Ok(true)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }

    /// Stored access token; empty values read as absent.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.read(ACCESS_TOKEN_KEY)
    }

    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.read(REFRESH_TOKEN_KEY)
    }

    /// Stored role. A value outside the known set reads as `None`.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.read(ROLE_KEY).and_then(|r| r.parse().ok())
    }

    #[must_use]
    pub fn email(&self) -> Option<String> {
        self.read(EMAIL_KEY)
    }

    #[must_use]
    pub fn full_name(&self) -> Option<String> {
        self.read(FULL_NAME_KEY)
    }

    #[must_use]
    pub fn snapshot(&self) -> StoredSession {
        StoredSession {
            access_token: self.access_token(),
            refresh_token: self.refresh_token(),
            role: self.role(),
            email: self.email(),
            full_name: self.full_name(),
        }
    }

    /// Writes to the same storage scope made by other handles.
    #[must_use]
    pub fn foreign_changes(&self) -> ForeignChanges {
        self.storage.foreign_changes()
    }

    fn read(&self, key: &str) -> Option<String> {
        self.storage.get(key).filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
