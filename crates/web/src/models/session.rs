//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use jharkhand_tourism_core::Role;

/// Session-stored user identity.
///
/// Written once at sign-in. The role is not revalidated for the lifetime of
/// the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's email address.
    pub email: String,
    /// Role resolved from `profiles` at sign-in.
    pub role: Role,
}

impl CurrentUser {
    /// Whether this user may view the dashboard.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the identity provider access token (used at sign-out).
    pub const ACCESS_TOKEN: &str = "access_token";
}
