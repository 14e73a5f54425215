//! Account roles recognised by the backend.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a role string is not one of the known roles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0:?}")]
pub struct RoleParseError(pub String);

/// Role attached to an authenticated account.
///
/// The wire form is the upper-case name (`"ADMIN"`, `"CUSTOMER"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Customer,
}

impl Role {
    /// Wire/storage representation of the role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Customer => "CUSTOMER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "ADMIN" => Ok(Self::Admin),
            "CUSTOMER" => Ok(Self::Customer),
            other => Err(RoleParseError(other.to_owned())),
        }
    }
}
