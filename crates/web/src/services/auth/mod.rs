//! Sign-in, registration and role resolution.
//!
//! Credential checks are delegated to an external [`IdentityProvider`]. After
//! the provider accepts a user, the site looks up the user's `profiles` row
//! exactly once to learn their [`Role`]. A failed or empty lookup degrades to
//! [`Role::User`] and is logged; it never fails the sign-in.

pub mod error;

pub use error::AuthError;

use async_trait::async_trait;
use serde_json::Value;
use tracing::instrument;

use jharkhand_tourism_core::{Role, UserId};

use crate::db::{DataStore, Filter, tables};
use crate::models::CurrentUser;

/// A user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: UserId,
    pub email: Option<String>,
}

/// Result of a successful sign-in or sign-up.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: AuthUser,
    /// Provider access token, used for sign-out. Absent when sign-up is
    /// pending email confirmation.
    pub access_token: Option<String>,
}

/// Narrow interface to the external identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify an email/password pair.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;

    /// Create a new account.
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;

    /// Revoke a previously issued access token.
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;
}

/// A user accepted by the provider, ready to be stored in the session.
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub user: CurrentUser,
    pub access_token: Option<String>,
}

impl SignedIn {
    /// Where to send the browser next.
    #[must_use]
    pub const fn redirect_path(&self) -> &'static str {
        self.user.role.landing_path()
    }
}

/// Sign a user in and resolve their role.
///
/// # Errors
///
/// Returns the provider's error when the credentials are rejected or the
/// provider cannot be reached. Role lookup problems are not errors.
#[instrument(skip(identity, store, password))]
pub async fn sign_in(
    identity: &dyn IdentityProvider,
    store: &dyn DataStore,
    email: &str,
    password: &str,
) -> Result<SignedIn, AuthError> {
    let session = identity.sign_in(email, password).await?;
    Ok(complete(store, session, email).await)
}

/// Register a new account and resolve its role.
///
/// # Errors
///
/// Returns the provider's error when sign-up is refused.
#[instrument(skip(identity, store, password))]
pub async fn register(
    identity: &dyn IdentityProvider,
    store: &dyn DataStore,
    email: &str,
    password: &str,
) -> Result<SignedIn, AuthError> {
    let session = identity.sign_up(email, password).await?;
    Ok(complete(store, session, email).await)
}

/// Revoke the provider token. Best effort; failures are logged.
pub async fn sign_out(identity: &dyn IdentityProvider, access_token: Option<&str>) {
    let Some(token) = access_token else {
        return;
    };

    if let Err(e) = identity.sign_out(token).await {
        tracing::warn!(error = %e, "Failed to revoke identity provider token");
    }
}

async fn complete(store: &dyn DataStore, session: AuthSession, submitted_email: &str) -> SignedIn {
    let role = resolve_role(store, session.user.id).await;
    let email = session
        .user
        .email
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| submitted_email.to_string());

    tracing::info!(user_id = %session.user.id, %role, "User signed in");

    SignedIn {
        user: CurrentUser { email, role },
        access_token: session.access_token,
    }
}

/// Look up a user's role from `profiles`, defaulting to [`Role::User`].
pub async fn resolve_role(store: &dyn DataStore, user_id: UserId) -> Role {
    let filter = Filter::eq("id", user_id.to_string()).columns("role");

    let rows = match store.select(tables::PROFILES, &filter).await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(%user_id, error = %e, "Profile lookup failed, defaulting role to user");
            return Role::User;
        }
    };

    let Some(row) = rows.first() else {
        tracing::warn!(%user_id, "No profile row, defaulting role to user");
        return Role::User;
    };

    match row.get("role").and_then(Value::as_str).map(str::parse::<Role>) {
        Some(Ok(role)) => role,
        Some(Err(e)) => {
            tracing::warn!(%user_id, error = %e, "Unrecognised profile role, defaulting to user");
            Role::User
        }
        None => {
            tracing::warn!(%user_id, "Profile row has no role, defaulting to user");
            Role::User
        }
    }
}
