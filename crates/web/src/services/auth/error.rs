//! Authentication error types.

use thiserror::Error;

/// Errors from the identity provider.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email/password pair was rejected.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Provider refused the request (e.g. sign-up for an existing email).
    #[error("rejected by identity provider: {0}")]
    Rejected(String),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned an unexpected status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Response body could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl AuthError {
    /// Message safe to show the visitor.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::InvalidCredentials => "Invalid credentials".to_string(),
            Self::Rejected(message) => message.clone(),
            Self::Http(_) | Self::Api { .. } | Self::Parse(_) => {
                "Authentication service unavailable".to_string()
            }
        }
    }
}
