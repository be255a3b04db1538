//! Session middleware configuration.
//!
//! Sessions live in process memory and are lost on restart. The cookie only
//! carries the session id, signed with the configured secret.

use secrecy::{ExposeSecret, SecretString};
use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "jt_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// The session secret cannot be used as a signing key.
#[derive(Debug, thiserror::Error)]
#[error("invalid session signing key: {0}")]
pub struct SessionLayerError(String);

/// Create the session layer with an in-memory store and signed cookies.
///
/// # Arguments
///
/// * `secret` - Cookie signing secret (at least 64 bytes)
/// * `secure` - Set the `Secure` cookie flag (site served over HTTPS)
///
/// # Errors
///
/// Returns an error if the secret is shorter than 64 bytes.
pub fn create_session_layer(
    secret: &SecretString,
    secure: bool,
) -> Result<SessionManagerLayer<MemoryStore, SignedCookie>, SessionLayerError> {
    let key = Key::try_from(secret.expose_secret().as_bytes())
        .map_err(|e| SessionLayerError(e.to_string()))?;

    Ok(SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key))
}
