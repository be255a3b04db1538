//! Chat endpoint used by the site-wide chat widget.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::services::chat::{self, ChatError};
use crate::state::AppState;

const UPSTREAM_FAILURE: &str = "Failed to connect to the chatbot service.";

/// Request body: `{message}`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

/// Response body: exactly one of `response` or `error`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatResponse {
    Response(String),
    Error(String),
}

/// Relay a visitor message to the chat model.
///
/// - blank or missing message: 400 `{error}`, no upstream call
/// - upstream failure: 500 `{error}` with a generic message, logged
#[instrument(skip_all)]
pub async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let message = match body {
        Ok(Json(request)) => request.message.unwrap_or_default(),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable chat request");
            String::new()
        }
    };

    match chat::chat(state.chat_model(), &message).await {
        Ok(reply) => Json(ChatResponse::Response(reply)).into_response(),
        Err(e @ ChatError::EmptyMessage) => (
            StatusCode::BAD_REQUEST,
            Json(ChatResponse::Error(e.to_string())),
        )
            .into_response(),
        Err(e @ ChatError::Upstream(_)) => {
            tracing::error!(error = %e, "Chat request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ChatResponse::Error(UPSTREAM_FAILURE.to_string())),
            )
                .into_response()
        }
    }
}
