//! The `/chat` proxy endpoint.

#![allow(clippy::unwrap_used)]

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::json;

use jharkhand_tourism_integration_tests::{TestApp, body_json};
use jharkhand_tourism_web::llm::{ChatMessage, ChatRole};

#[tokio::test]
async fn test_empty_message_is_rejected_without_upstream_call() {
    let app = TestApp::new();

    for body in [json!({"message": ""}), json!({"message": "   "}), json!({})] {
        let response = app.post_json("/chat", &body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Message cannot be empty"})
        );
    }
    assert_eq!(app.chat.calls(), 0);
}

#[tokio::test]
async fn test_reply_is_relayed() {
    let app = TestApp::new();

    let response = app.post_json("/chat", &json!({"message": "hello"})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"response": "hi there"}));

    assert_eq!(app.chat.calls(), 1);
    let messages = app.chat.last_messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, ChatRole::System);
    assert_eq!(messages[1], ChatMessage::user("hello"));
}

#[tokio::test]
async fn test_upstream_failure_is_generic_500() {
    let app = TestApp::new();
    app.chat.fail();

    let response = app
        .post_json("/chat", &json!({"message": "Best season for Betla?"}))
        .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Failed to connect to the chatbot service."})
    );
}

#[tokio::test]
async fn test_malformed_body_is_a_client_error() {
    let app = TestApp::new();

    let response = app
        .send(
            Request::builder()
                .method("POST")
                .uri("/chat")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.chat.calls(), 0);
}
