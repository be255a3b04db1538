//! Chat-completion API integration.
//!
//! The chat widget on every page posts to `/chat`; the handler forwards the
//! visitor's message, together with a fixed system instruction, to a hosted
//! chat-completion API (OpenRouter by default) and relays the first reply.
//!
//! Handlers depend on the [`ChatModel`] trait rather than the HTTP client so
//! the upstream can be stubbed in tests.

mod client;
pub mod types;

pub use client::OpenRouterClient;
pub use types::{ChatMessage, ChatRole};

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when calling the chat-completion API.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Response had no completion text.
    #[error("response contained no completion")]
    EmptyResponse,

    /// Failed to parse response.
    #[error("parse error: {0}")]
    Parse(String),
}

/// A hosted language model that completes a conversation.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send `messages` and return the first completion's text verbatim.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError>;
}
