//! Session-backed user extractors.
//!
//! The signed-in user is stored in the session once at sign-in, together
//! with the identity provider's access token. The role is never re-checked
//! against the store while the session lives.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentUser, session_keys};
use crate::services::auth::SignedIn;

/// Extractor that optionally gets the current user.
///
/// Never rejects; a missing session layer or an unreadable session both
/// count as signed out.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
///     match user {
///         Some(u) => format!("Namaste, {}!", u.email),
///         None => "Namaste!".to_string(),
///     }
/// }
/// ```
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentUser>(session_keys::CURRENT_USER)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(user))
    }
}

/// Extractor that requires a signed-in admin.
///
/// Everyone else is sent back to the home page.
pub struct RequireAdmin(pub CurrentUser);

/// Rejection for [`RequireAdmin`].
pub struct NotAdmin;

impl IntoResponse for NotAdmin {
    fn into_response(self) -> Response {
        Redirect::to("/").into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = NotAdmin;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(OptionalAuth(user)) = OptionalAuth::from_request_parts(parts, state).await;

        match user {
            Some(user) if user.is_admin() => Ok(Self(user)),
            Some(user) => {
                tracing::info!(email = %user.email, "Non-admin user denied dashboard access");
                Err(NotAdmin)
            }
            None => Err(NotAdmin),
        }
    }
}

/// Store a freshly signed-in user in the session.
///
/// Rotates the session id first so a pre-login id is never reused.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    signed_in: &SignedIn,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session
        .insert(session_keys::CURRENT_USER, &signed_in.user)
        .await?;
    match &signed_in.access_token {
        Some(token) => session.insert(session_keys::ACCESS_TOKEN, token).await?,
        // Drop any token left by an earlier sign-in.
        None => {
            session
                .remove::<String>(session_keys::ACCESS_TOKEN)
                .await?;
        }
    }
    Ok(())
}

/// The identity provider access token stored at sign-in, if any.
pub async fn access_token(session: &Session) -> Option<String> {
    session
        .get::<String>(session_keys::ACCESS_TOKEN)
        .await
        .ok()
        .flatten()
}

/// Drop all session data and delete the cookie (logout).
///
/// # Errors
///
/// Returns an error if the session store rejects the deletion.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}
