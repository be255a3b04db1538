//! The real HTTP clients against local stub servers.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;

use jharkhand_tourism_web::config::{OpenRouterConfig, SupabaseConfig};
use jharkhand_tourism_web::db::{DataStore, Filter, StoreError};
use jharkhand_tourism_web::llm::{ChatMessage, ChatModel, LlmError, OpenRouterClient};
use jharkhand_tourism_web::services::auth::{AuthError, IdentityProvider};
use jharkhand_tourism_web::supabase::SupabaseClient;

const USER_ID: &str = "0b3f6a8e-5d2c-4f1a-9e7b-2c4d6e8f0a1b";

/// What a stub endpoint saw.
#[derive(Debug, Clone)]
struct Seen {
    authorization: Option<String>,
    apikey: Option<String>,
    prefer: Option<String>,
    query: Vec<(String, String)>,
    body: Value,
}

type Recorder = Arc<Mutex<Vec<Seen>>>;

fn record(
    seen: &Recorder,
    headers: &HeaderMap,
    query: Vec<(String, String)>,
    body: Value,
) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };
    seen.lock().unwrap().push(Seen {
        authorization: header("authorization"),
        apikey: header("apikey"),
        prefer: header("prefer"),
        query,
        body,
    });
}

/// Serve `router` on an ephemeral port and return its base URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

// =============================================================================
// OpenRouter
// =============================================================================

async fn completions(
    State(seen): State<Recorder>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    record(&seen, &headers, Vec::new(), body.clone());

    if body["messages"][1]["content"] == "fail" {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "boom"})));
    }
    (
        StatusCode::OK,
        Json(json!({
            "id": "gen-1",
            "choices": [{"message": {"role": "assistant", "content": "hi there"}}]
        })),
    )
}

async fn openrouter_client() -> (OpenRouterClient, Recorder) {
    let seen = Recorder::default();
    let router = Router::new()
        .route("/api/v1/chat/completions", post(completions))
        .with_state(seen.clone());
    let base = serve(router).await;

    let client = OpenRouterClient::new(&OpenRouterConfig {
        api_key: SecretString::from("sk-or-test"),
        api_url: format!("{base}/api/v1/chat/completions"),
        model: "mistralai/mistral-7b-instruct:free".to_string(),
    })
    .unwrap();
    (client, seen)
}

#[tokio::test]
async fn test_openrouter_sends_model_and_messages() {
    let (client, seen) = openrouter_client().await;

    let messages = [ChatMessage::system("be brief"), ChatMessage::user("hello")];
    let reply = client.complete(&messages).await.unwrap();
    assert_eq!(reply, "hi there");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].authorization.as_deref(), Some("Bearer sk-or-test"));
    assert_eq!(
        seen[0].body,
        json!({
            "model": "mistralai/mistral-7b-instruct:free",
            "messages": [
                {"role": "system", "content": "be brief"},
                {"role": "user", "content": "hello"}
            ]
        })
    );
}

#[tokio::test]
async fn test_openrouter_error_status() {
    let (client, _seen) = openrouter_client().await;

    let messages = [ChatMessage::system("be brief"), ChatMessage::user("fail")];
    let err = client.complete(&messages).await.unwrap_err();
    assert!(matches!(err, LlmError::Api { status: 500, .. }), "{err:?}");
}

// =============================================================================
// Supabase
// =============================================================================

async fn places(
    State(seen): State<Recorder>,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
) -> impl IntoResponse {
    record(&seen, &headers, query, Value::Null);
    Json(json!([
        {"id": 1, "name": "Hundru Falls"},
        {"id": 2, "name": "Patratu Valley"}
    ]))
}

async fn insert_feedback(
    State(seen): State<Recorder>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StatusCode {
    record(&seen, &headers, Vec::new(), body);
    StatusCode::CREATED
}

async fn products_unavailable() -> impl IntoResponse {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({"message": "database is restarting"})),
    )
}

async fn token(
    State(seen): State<Recorder>,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    record(&seen, &headers, query, body.clone());

    if body["password"] != "correct horse" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_grant",
                "error_description": "Invalid login credentials"
            })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "access_token": "jwt-abc",
            "token_type": "bearer",
            "user": {"id": USER_ID, "email": body["email"]}
        })),
    )
}

async fn logout(State(seen): State<Recorder>, headers: HeaderMap) -> StatusCode {
    record(&seen, &headers, Vec::new(), Value::Null);
    StatusCode::NO_CONTENT
}

async fn supabase_client() -> (SupabaseClient, Recorder) {
    let seen = Recorder::default();
    let router = Router::new()
        .route("/rest/v1/places", get(places))
        .route("/rest/v1/feedback", post(insert_feedback))
        .route("/rest/v1/products", get(products_unavailable))
        .route("/auth/v1/token", post(token))
        .route("/auth/v1/logout", post(logout))
        .with_state(seen.clone());
    let base = serve(router).await;

    let client = SupabaseClient::new(&SupabaseConfig {
        url: Url::parse(&base).unwrap(),
        api_key: SecretString::from("anon-key"),
    })
    .unwrap();
    (client, seen)
}

#[tokio::test]
async fn test_supabase_select_sends_key_and_filters() {
    let (client, seen) = supabase_client().await;

    let rows = client
        .select("places", &Filter::eq("name", "Hundru Falls"))
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "Hundru Falls");

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0].apikey.as_deref(), Some("anon-key"));
    assert_eq!(seen[0].authorization.as_deref(), Some("Bearer anon-key"));
    assert_eq!(
        seen[0].query,
        vec![
            ("select".to_string(), "*".to_string()),
            ("name".to_string(), "eq.Hundru Falls".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_supabase_insert_posts_row() {
    let (client, seen) = supabase_client().await;

    let row = json!({"name": "Asha", "email": "", "message": "Lovely", "sentiment_score": 0.6});
    client.insert("feedback", row.clone()).await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0].body, row);
    assert_eq!(seen[0].prefer.as_deref(), Some("return=minimal"));
}

#[tokio::test]
async fn test_supabase_error_status() {
    let (client, _seen) = supabase_client().await;

    let err = client.select("products", &Filter::all()).await.unwrap_err();
    assert!(matches!(err, StoreError::Api { status: 503, .. }), "{err:?}");
}

#[tokio::test]
async fn test_supabase_sign_in() {
    let (client, seen) = supabase_client().await;

    let session = client
        .sign_in("asha@example.com", "correct horse")
        .await
        .unwrap();
    assert_eq!(session.user.id.to_string(), USER_ID);
    assert_eq!(session.user.email.as_deref(), Some("asha@example.com"));
    assert_eq!(session.access_token.as_deref(), Some("jwt-abc"));

    let seen = seen.lock().unwrap();
    assert_eq!(
        seen[0].query,
        vec![("grant_type".to_string(), "password".to_string())]
    );
    assert_eq!(
        seen[0].body,
        json!({"email": "asha@example.com", "password": "correct horse"})
    );
}

#[tokio::test]
async fn test_supabase_sign_in_rejected() {
    let (client, _seen) = supabase_client().await;

    let err = client
        .sign_in("asha@example.com", "wrong")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials), "{err:?}");
}

#[tokio::test]
async fn test_supabase_sign_out_uses_user_token() {
    let (client, seen) = supabase_client().await;

    client.sign_out("jwt-abc").await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0].authorization.as_deref(), Some("Bearer jwt-abc"));
    assert_eq!(seen[0].apikey.as_deref(), Some("anon-key"));
}
