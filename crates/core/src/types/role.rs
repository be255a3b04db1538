//! Site roles.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a `profiles.role` value is not a known role.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid role: {0}")]
pub struct RoleParseError(pub String);

/// Role attached to a signed-in user.
///
/// Read once from the `profiles` table at sign-in and cached in the session.
/// Anything that cannot be resolved falls back to [`Role::User`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular visitor account.
    #[default]
    User,
    /// Site administrator; may view the feedback dashboard.
    Admin,
}

impl Role {
    /// Whether this role may view the sentiment dashboard.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Where the browser goes after a successful sign-in.
    #[must_use]
    pub const fn landing_path(self) -> &'static str {
        match self {
            Self::Admin => "/dashboard",
            Self::User => "/",
        }
    }

    /// Lowercase name, as stored in `profiles.role`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(RoleParseError(s.to_string())),
        }
    }
}
