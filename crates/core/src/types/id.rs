//! Identity-provider user IDs.
//!
//! The hosted auth service identifies users by UUID. The same value keys the
//! `profiles` table, so the ID is carried from sign-in into the role lookup.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user ID issued by the identity provider.
///
/// ```
/// use jharkhand_tourism_core::UserId;
///
/// let id: UserId = "6f1f2b9e-8d0c-4a43-9b8e-2b1a7d4d6c11".parse().unwrap();
/// assert_eq!(id.to_string(), "6f1f2b9e-8d0c-4a43-9b8e-2b1a7d4d6c11");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Wrap an existing UUID.
    #[must_use]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}
