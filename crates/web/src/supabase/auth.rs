//! `IdentityProvider` implementation over the auth API.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::instrument;

use crate::services::auth::{AuthError, AuthSession, IdentityProvider};

use super::SupabaseClient;
use super::types::{ApiErrorBody, Credentials, SignUpResponse, TokenResponse};

impl SupabaseClient {
    fn auth_url(&self, path: &str) -> Result<url::Url, AuthError> {
        self.endpoint(&format!("auth/v1/{path}"))
            .map_err(|e| AuthError::Parse(format!("invalid auth URL: {e}")))
    }
}

#[async_trait]
impl IdentityProvider for SupabaseClient {
    #[instrument(skip(self, password))]
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let url = self.auth_url("token?grant_type=password")?;

        let response = self
            .http()
            .post(url)
            .json(&Credentials { email, password })
            .send()
            .await?;

        let status = response.status();
        if matches!(
            status,
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            let raw = response.text().await.unwrap_or_default();
            tracing::debug!(reason = %ApiErrorBody::message_from(&raw), "Sign-in refused");
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            return Err(AuthError::Api {
                status: status.as_u16(),
                message: ApiErrorBody::message_from(&raw),
            });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Parse(e.to_string()))?;

        Ok(token.into())
    }

    #[instrument(skip(self, password))]
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let url = self.auth_url("signup")?;

        let response = self
            .http()
            .post(url)
            .json(&Credentials { email, password })
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() {
            let raw = response.text().await.unwrap_or_default();
            return Err(AuthError::Rejected(ApiErrorBody::message_from(&raw)));
        }
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            return Err(AuthError::Api {
                status: status.as_u16(),
                message: ApiErrorBody::message_from(&raw),
            });
        }

        let body: SignUpResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Parse(e.to_string()))?;

        Ok(body.into())
    }

    #[instrument(skip_all)]
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let url = self.auth_url("logout")?;

        let response = self
            .http()
            .post(url)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            return Err(AuthError::Api {
                status: status.as_u16(),
                message: ApiErrorBody::message_from(&raw),
            });
        }

        Ok(())
    }
}
