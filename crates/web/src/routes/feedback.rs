//! Feedback form route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tracing::instrument;

use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::CurrentUser;
use crate::services::feedback;
use crate::state::AppState;

/// Feedback form data. Missing fields are treated as empty.
#[derive(Debug, Deserialize)]
pub struct FeedbackForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

/// Feedback form template.
#[derive(Template, WebTemplate)]
#[template(path = "feedback.html")]
pub struct FeedbackTemplate {
    pub user: Option<CurrentUser>,
}

/// Display the feedback form.
pub async fn form(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
    FeedbackTemplate { user }
}

/// Handle a feedback submission.
///
/// Always redirects home; a failed insert is only logged.
#[instrument(skip(state, form))]
pub async fn submit(State(state): State<AppState>, Form(form): Form<FeedbackForm>) -> Redirect {
    if let Err(e) = feedback::submit(
        state.store(),
        state.scorer(),
        &form.name,
        &form.email,
        &form.message,
    )
    .await
    {
        tracing::error!(error = %e, "Failed to store feedback");
    }

    Redirect::to("/")
}
