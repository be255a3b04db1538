//! Authentication route handlers.
//!
//! Sign-in and registration post plain HTML forms. Success redirects; failure
//! answers with a JSON `{error}` body (HTTP 200) and leaves the session
//! untouched, so no cookie is issued.

use axum::{
    Form, Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::middleware::{access_token, clear_current_user, set_current_user};
use crate::services::auth::{self, AuthError, SignedIn};
use crate::state::AppState;

/// Email/password form data.
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Body returned when sign-in or registration fails.
#[derive(Debug, Serialize)]
pub struct AuthErrorResponse {
    pub error: String,
}

/// Handle the sign-in form.
///
/// Admins land on `/dashboard`, everyone else on `/`.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn signin(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> Response {
    match auth::sign_in(state.identity(), state.store(), &form.email, &form.password).await {
        Ok(signed_in) => {
            let target = signed_in.redirect_path();
            start_session(&session, &signed_in, target).await
        }
        Err(e) => auth_failure(&e),
    }
}

/// Handle the registration form.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> Response {
    match auth::register(state.identity(), state.store(), &form.email, &form.password).await {
        Ok(signed_in) => start_session(&session, &signed_in, "/").await,
        Err(e) => auth_failure(&e),
    }
}

/// Sign out and return home.
///
/// Token revocation is best effort; the local session is always dropped.
#[instrument(skip_all)]
pub async fn logout(State(state): State<AppState>, session: Session) -> Redirect {
    let token = access_token(&session).await;
    auth::sign_out(state.identity(), token.as_deref()).await;

    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }
    clear_sentry_user();

    Redirect::to("/")
}

async fn start_session(session: &Session, signed_in: &SignedIn, target: &str) -> Response {
    if let Err(e) = set_current_user(session, signed_in).await {
        return AppError::Internal(format!("failed to store session: {e}")).into_response();
    }

    set_sentry_user(&signed_in.user.email, signed_in.user.role.as_str());
    Redirect::to(target).into_response()
}

fn auth_failure(error: &AuthError) -> Response {
    match error {
        AuthError::InvalidCredentials | AuthError::Rejected(_) => {
            tracing::info!(error = %error, "Authentication refused");
        }
        _ => tracing::error!(error = %error, "Identity provider failure"),
    }

    Json(AuthErrorResponse {
        error: error.public_message(),
    })
    .into_response()
}
