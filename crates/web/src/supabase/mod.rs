//! Client for the hosted database and identity service (Supabase).
//!
//! # APIs
//!
//! ## REST (`/rest/v1/{table}`)
//! - `GET` with `select=` and `column=eq.value` query parameters
//! - `POST` a JSON row with `Prefer: return=minimal`
//!
//! ## Auth (`/auth/v1/...`)
//! - `POST token?grant_type=password` - email/password sign-in
//! - `POST signup` - account creation
//! - `POST logout` - revoke the user's access token
//!
//! Every request carries the project API key in the `apikey` header. REST
//! calls also send it as the bearer token; `logout` sends the user's own
//! token instead.
//!
//! The client implements both [`DataStore`](crate::db::DataStore) and
//! [`IdentityProvider`](crate::services::auth::IdentityProvider).

mod auth;
mod rest;
mod types;

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use thiserror::Error;
use url::Url;

use crate::config::SupabaseConfig;

/// Errors building a [`SupabaseClient`].
#[derive(Debug, Error)]
pub enum SupabaseClientError {
    /// API key contains characters not allowed in a header.
    #[error("invalid API key format: {0}")]
    InvalidKey(#[from] reqwest::header::InvalidHeaderValue),

    /// HTTP client failed to build.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Project URL cannot be used as a base URL.
    #[error("invalid project URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Client for one Supabase project.
#[derive(Clone)]
pub struct SupabaseClient {
    inner: Arc<SupabaseClientInner>,
}

struct SupabaseClientInner {
    client: reqwest::Client,
    /// Project URL, always ending in `/`.
    base_url: Url,
}

impl SupabaseClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not a valid header value or the
    /// HTTP client fails to build.
    pub fn new(config: &SupabaseConfig) -> Result<Self, SupabaseClientError> {
        let key = config.api_key.expose_secret();

        let mut headers = HeaderMap::new();
        let mut apikey = HeaderValue::from_str(key)?;
        apikey.set_sensitive(true);
        headers.insert("apikey", apikey);

        let mut bearer = HeaderValue::from_str(&format!("Bearer {key}"))?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(SupabaseClientInner {
                client,
                base_url: with_trailing_slash(config.url.clone()),
            }),
        })
    }

    fn http(&self) -> &reqwest::Client {
        &self.inner.client
    }

    /// Resolve a path relative to the project URL.
    fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        self.inner.base_url.join(path)
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
