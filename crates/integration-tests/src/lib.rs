//! Test harness for the Jharkhand Tourism site.
//!
//! [`TestApp`] builds the production router with in-memory collaborators so
//! tests can seed tables, register accounts and script the chat model, then
//! inspect what the handlers did.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;

use jharkhand_tourism_core::UserId;
use jharkhand_tourism_web::content::{ContentStore, parse_page};
use jharkhand_tourism_web::db::{DataStore, Filter, StoreError};
use jharkhand_tourism_web::llm::{ChatMessage, ChatModel, LlmError};
use jharkhand_tourism_web::middleware::create_session_layer;
use jharkhand_tourism_web::services::auth::{AuthError, AuthSession, AuthUser, IdentityProvider};
use jharkhand_tourism_web::services::sentiment::SentimentScorer;
use jharkhand_tourism_web::state::AppState;

/// 64-byte cookie signing secret for tests.
pub const TEST_SESSION_SECRET: &str =
    "t3st-only-k3y/9fQ2mZx7LrW4pV8sN1cB6hJ0dK5gT3yU2iO9aE7wR4qX8zC1vB5n";

const ABOUT_PAGE: &str = "---\ntitle: About Jharkhand\ndescription: Land of forests\n---\n\nJharkhand sits on the *Chota Nagpur* plateau.\n";

// =============================================================================
// Data store
// =============================================================================

/// Tables held in memory. `select` applies equality filters; `insert` appends.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<HashMap<String, Vec<Value>>>,
    fail: Mutex<bool>,
}

impl InMemoryStore {
    /// Replace the rows of `table`.
    pub fn seed(&self, table: &str, rows: Vec<Value>) {
        self.tables.lock().unwrap().insert(table.to_string(), rows);
    }

    /// Every row of `table`.
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    /// Make every subsequent call fail with a 503.
    pub fn fail_all(&self) {
        *self.fail.lock().unwrap() = true;
    }

    fn check(&self) -> Result<(), StoreError> {
        if *self.fail.lock().unwrap() {
            return Err(StoreError::Api {
                status: 503,
                message: "store unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl DataStore for InMemoryStore {
    async fn select(&self, table: &str, filter: &Filter) -> Result<Vec<Value>, StoreError> {
        self.check()?;
        Ok(self
            .rows(table)
            .into_iter()
            .filter(|row| filter.matches(row))
            .collect())
    }

    async fn insert(&self, table: &str, row: Value) -> Result<(), StoreError> {
        self.check()?;
        self.tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .push(row);
        Ok(())
    }
}

// =============================================================================
// Identity provider
// =============================================================================

struct Account {
    id: UserId,
    password: String,
}

/// Accounts held in memory. Tokens are `token-{user id}`.
#[derive(Default)]
pub struct StubIdentity {
    accounts: Mutex<HashMap<String, Account>>,
    revoked: Mutex<Vec<String>>,
    confirm_email: Mutex<bool>,
}

impl StubIdentity {
    /// Add an account and return its id.
    pub fn add_user(&self, email: &str, password: &str) -> UserId {
        let id = UserId::new(uuid::Uuid::new_v4());
        self.accounts.lock().unwrap().insert(
            email.to_string(),
            Account {
                id,
                password: password.to_string(),
            },
        );
        id
    }

    /// Make `sign_up` return no token, as when email confirmation is pending.
    pub fn require_email_confirmation(&self) {
        *self.confirm_email.lock().unwrap() = true;
    }

    /// Tokens passed to `sign_out`.
    pub fn revoked(&self) -> Vec<String> {
        self.revoked.lock().unwrap().clone()
    }

    fn session_for(email: &str, id: UserId) -> AuthSession {
        AuthSession {
            user: AuthUser {
                id,
                email: Some(email.to_string()),
            },
            access_token: Some(format!("token-{id}")),
        }
    }
}

#[async_trait]
impl IdentityProvider for StubIdentity {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let accounts = self.accounts.lock().unwrap();
        match accounts.get(email) {
            Some(account) if account.password == password => {
                Ok(Self::session_for(email, account.id))
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        if self.accounts.lock().unwrap().contains_key(email) {
            return Err(AuthError::Rejected("User already registered".to_string()));
        }
        let id = self.add_user(email, password);
        let mut session = Self::session_for(email, id);
        if *self.confirm_email.lock().unwrap() {
            session.access_token = None;
        }
        Ok(session)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        self.revoked.lock().unwrap().push(access_token.to_string());
        Ok(())
    }
}

// =============================================================================
// Chat model and scorer
// =============================================================================

/// Replies with a fixed text, or fails when no reply is set.
pub struct StubChat {
    reply: Mutex<Option<String>>,
    calls: AtomicUsize,
    last: Mutex<Vec<ChatMessage>>,
}

impl StubChat {
    #[must_use]
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Mutex::new(Some(reply.to_string())),
            calls: AtomicUsize::new(0),
            last: Mutex::new(Vec::new()),
        }
    }

    /// Make subsequent calls fail as if the upstream returned a 502.
    pub fn fail(&self) {
        *self.reply.lock().unwrap() = None;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Messages of the most recent call.
    pub fn last_messages(&self) -> Vec<ChatMessage> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for StubChat {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = messages.to_vec();
        self.reply.lock().unwrap().clone().ok_or(LlmError::Api {
            status: 502,
            message: "bad gateway".to_string(),
        })
    }
}

/// Scores by keyword so tests control the bucket.
pub struct KeywordScorer;

impl SentimentScorer for KeywordScorer {
    fn polarity(&self, text: &str) -> f64 {
        let text = text.to_lowercase();
        if text.contains("loved") {
            0.8
        } else if text.contains("hated") {
            -0.6
        } else {
            0.0
        }
    }
}

// =============================================================================
// Test application
// =============================================================================

/// The real router wired to in-memory collaborators.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
    pub identity: Arc<StubIdentity>,
    pub chat: Arc<StubChat>,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::default());
        let identity = Arc::new(StubIdentity::default());
        let chat = Arc::new(StubChat::replying("hi there"));
        let content = ContentStore::from_pages([parse_page("about", ABOUT_PAGE).unwrap()]);

        let state = AppState::new(
            store.clone(),
            identity.clone(),
            chat.clone(),
            Arc::new(KeywordScorer),
            content,
        );
        let session_layer =
            create_session_layer(&SecretString::from(TEST_SESSION_SECRET), false).unwrap();
        let router = jharkhand_tourism_web::app(state, session_layer, &static_dir());

        Self {
            router,
            store,
            identity,
            chat,
        }
    }

    /// Add an account with a `profiles` row carrying `role`.
    pub fn add_user_with_role(&self, email: &str, password: &str, role: &str) -> UserId {
        let id = self.identity.add_user(email, password);
        let mut profiles = self.store.rows("profiles");
        profiles.push(serde_json::json!({"id": id.to_string(), "role": role}));
        self.store.seed("profiles", profiles);
        id
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(
        &self,
        uri: &str,
        fields: &[(&str, &str)],
        cookie: Option<&str>,
    ) -> Response<Body> {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", form_encode(k), form_encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body)).unwrap()).await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> Response<Body> {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Sign in and return the session cookie.
    pub async fn sign_in(&self, email: &str, password: &str) -> String {
        let response = self
            .post_form("/signin", &[("email", email), ("password", password)], None)
            .await;
        session_cookie(&response).unwrap()
    }
}

// =============================================================================
// Response helpers
// =============================================================================

/// Static assets shipped with the web crate.
#[must_use]
pub fn static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../web/static")
}

/// `name=value` of the session cookie set by `response`, if any.
#[must_use]
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("jt_session="))
        .and_then(|v| v.split(';').next())
        .map(String::from)
}

/// `Location` header of a redirect.
#[must_use]
pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

/// Minimal `application/x-www-form-urlencoded` encoding.
fn form_encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
