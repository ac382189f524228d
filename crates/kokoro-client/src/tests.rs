use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use kokoro_core::types::{Role, Turn};
use kokoro_core::KokoroError;

use crate::client::CompletionClient;
use crate::models::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig};

// ========== Wire shapes ==========

#[test]
fn test_request_wire_shape() {
    let request = GenerateContentRequest {
        contents: vec![Content::text(Some("user"), "hi")],
        system_instruction: Content::text(None, "be nice"),
        generation_config: GenerationConfig::default(),
    };
    let v = serde_json::to_value(&request).unwrap();
    assert_eq!(v["contents"][0]["role"], "user");
    assert_eq!(v["contents"][0]["parts"][0]["text"], "hi");
    assert_eq!(v["systemInstruction"]["parts"][0]["text"], "be nice");
    assert!(v["systemInstruction"].get("role").is_none());
    assert_eq!(v["generationConfig"]["temperature"], 0.8);
    assert_eq!(v["generationConfig"]["topP"], 0.95);
    assert_eq!(v["generationConfig"]["topK"], 40);
    assert_eq!(v["generationConfig"]["maxOutputTokens"], 8192);
}

#[test]
fn test_response_first_text() {
    let raw = json!({
        "candidates": [
            { "content": { "role": "model", "parts": [{ "text": "first" }] } },
            { "content": { "role": "model", "parts": [{ "text": "second" }] } }
        ]
    });
    let parsed: GenerateContentResponse = serde_json::from_value(raw).unwrap();
    assert_eq!(parsed.first_text().unwrap(), "first");
}

#[test]
fn test_response_no_candidates() {
    let parsed: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
    assert!(parsed.first_text().is_none());
    let parsed: GenerateContentResponse =
        serde_json::from_value(json!({ "candidates": [] })).unwrap();
    assert!(parsed.first_text().is_none());
}

#[test]
fn test_response_empty_text_is_absent() {
    let raw = json!({
        "candidates": [{ "content": { "parts": [{ "text": "" }] } }]
    });
    let parsed: GenerateContentResponse = serde_json::from_value(raw).unwrap();
    assert!(parsed.first_text().is_none());
}

// ========== Against a mock upstream ==========

async fn spawn_upstream(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn history() -> Vec<Turn> {
    vec![
        Turn::new(Role::User, "hello"),
        Turn::new(Role::Assistant, "hi there"),
        Turn::new(Role::User, "how are you?"),
    ]
}

#[tokio::test]
async fn test_complete_returns_reply_and_maps_roles() {
    let app = Router::new().route(
        "/models/{model}",
        post(|Json(body): Json<Value>| async move {
            // Assistant turns arrive as the model role.
            assert_eq!(body["contents"][0]["role"], "user");
            assert_eq!(body["contents"][1]["role"], "model");
            assert_eq!(body["contents"][2]["role"], "user");
            assert_eq!(body["systemInstruction"]["parts"][0]["text"], "persona");
            Json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "[EMOTION:happy] fine!" }] } }]
            }))
        }),
    );
    let base = spawn_upstream(app).await;
    let client = CompletionClient::new("k", "test-model").with_base_url(base);
    let reply = client.complete(&history(), "persona").await.unwrap();
    assert_eq!(reply, "[EMOTION:happy] fine!");
}

#[tokio::test]
async fn test_complete_upstream_error_passthrough() {
    let app = Router::new().route(
        "/models/{model}",
        post(|| async {
            (
                axum::http::StatusCode::TOO_MANY_REQUESTS,
                Json(json!({ "error": { "message": "quota exceeded" } })),
            )
        }),
    );
    let base = spawn_upstream(app).await;
    let client = CompletionClient::new("k", "test-model").with_base_url(base);
    match client.complete(&history(), "persona").await {
        Err(KokoroError::Upstream { status, message }) => {
            assert_eq!(status, 429);
            assert_eq!(message, "quota exceeded");
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_complete_upstream_error_without_body_message() {
    let app = Router::new().route(
        "/models/{model}",
        post(|| async { (axum::http::StatusCode::BAD_GATEWAY, "boom") }),
    );
    let base = spawn_upstream(app).await;
    let client = CompletionClient::new("k", "test-model").with_base_url(base);
    match client.complete(&history(), "persona").await {
        Err(KokoroError::Upstream { status, message }) => {
            assert_eq!(status, 502);
            assert_eq!(message, "API Error: 502");
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_complete_empty_candidates() {
    let app = Router::new().route(
        "/models/{model}",
        post(|| async { Json(json!({ "candidates": [] })) }),
    );
    let base = spawn_upstream(app).await;
    let client = CompletionClient::new("k", "test-model").with_base_url(base);
    assert!(matches!(
        client.complete(&history(), "persona").await,
        Err(KokoroError::EmptyResponse)
    ));
}
