//! Wire types for the Supabase REST and auth APIs.

use serde::{Deserialize, Serialize};

use jharkhand_tourism_core::UserId;

use crate::services::auth::{AuthSession, AuthUser};

/// Body of `token?grant_type=password` and `signup`.
#[derive(Debug, Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// User object returned by the auth API.
#[derive(Debug, Deserialize)]
pub struct UserPayload {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<String>,
}

/// Session returned by a successful sign-in (or auto-confirmed sign-up).
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub user: UserPayload,
}

/// `signup` returns a session when email confirmation is off, otherwise
/// just the pending user.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SignUpResponse {
    Session(TokenResponse),
    User(UserPayload),
}

impl From<UserPayload> for AuthUser {
    fn from(user: UserPayload) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

impl From<TokenResponse> for AuthSession {
    fn from(token: TokenResponse) -> Self {
        Self {
            user: token.user.into(),
            access_token: Some(token.access_token),
        }
    }
}

impl From<SignUpResponse> for AuthSession {
    fn from(response: SignUpResponse) -> Self {
        match response {
            SignUpResponse::Session(token) => token.into(),
            SignUpResponse::User(user) => Self {
                user: user.into(),
                access_token: None,
            },
        }
    }
}

/// Error body. The REST and auth APIs use different field names across
/// versions, so every known one is optional.
#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    /// Parse an error body, falling back to the raw text.
    pub fn message_from(raw: &str) -> String {
        serde_json::from_str::<Self>(raw)
            .ok()
            .and_then(|body| {
                body.msg
                    .or(body.message)
                    .or(body.error_description)
                    .or(body.error)
            })
            .unwrap_or_else(|| raw.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_sign_up_with_session() {
        let response: SignUpResponse = serde_json::from_value(json!({
            "access_token": "jwt",
            "token_type": "bearer",
            "user": {"id": "0b9b3b55-3f0a-4bb4-9a53-4c8f6b3d2f11", "email": "a@b.in"}
        }))
        .unwrap();
        let session = AuthSession::from(response);
        assert_eq!(session.access_token.as_deref(), Some("jwt"));
        assert_eq!(session.user.email.as_deref(), Some("a@b.in"));
    }

    #[test]
    fn test_sign_up_pending_confirmation() {
        let response: SignUpResponse = serde_json::from_value(json!({
            "id": "0b9b3b55-3f0a-4bb4-9a53-4c8f6b3d2f11",
            "email": "a@b.in",
            "confirmation_sent_at": "2026-01-01T00:00:00Z"
        }))
        .unwrap();
        let session = AuthSession::from(response);
        assert!(session.access_token.is_none());
        assert_eq!(
            session.user.id.to_string(),
            "0b9b3b55-3f0a-4bb4-9a53-4c8f6b3d2f11"
        );
    }

    #[test]
    fn test_error_message_variants() {
        assert_eq!(
            ApiErrorBody::message_from(r#"{"code":400,"msg":"Invalid login credentials"}"#),
            "Invalid login credentials"
        );
        assert_eq!(
            ApiErrorBody::message_from(
                r#"{"error":"invalid_grant","error_description":"Email not confirmed"}"#
            ),
            "Email not confirmed"
        );
        assert_eq!(
            ApiErrorBody::message_from(r#"{"message":"relation \"x\" does not exist"}"#),
            "relation \"x\" does not exist"
        );
        assert_eq!(ApiErrorBody::message_from("Bad Gateway"), "Bad Gateway");
    }
}
