use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use kokoro_core::emotion::parse_tagged_reply;
use kokoro_core::types::{Emotion, Turn};
use kokoro_core::KokoroError;

use crate::error::ApiError;
use crate::state::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/stats", get(stats))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<Turn>,
    pub session_id: Option<String>,
    pub session_title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub emotion: Emotion,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub sessions: usize,
    pub total_messages: usize,
    pub training_pairs: usize,
    #[serde(rename = "dataSizeKB")]
    pub data_size_kb: String,
}

/// Forward the history to the completion API, parse the emotion tag,
/// record the exchange, and hand back the clean reply.
async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let client = state.client.as_ref().ok_or_else(|| {
        ApiError::from(KokoroError::Configuration(
            "completion API key is not configured".into(),
        ))
    })?;

    // Rejected before any side effect: nothing is logged or recorded.
    if req.messages.is_empty() {
        return Err(KokoroError::Validation("messages must be a non-empty array".into()).into());
    }

    let raw = client.complete(&req.messages, &state.system_prompt).await?;
    let (emotion, reply) = parse_tagged_reply(&raw);

    // Training logs store the clean text, emotion tag stripped.
    state
        .exporter
        .append_exchange(&state.system_prompt, &req.messages, &reply)?;

    if let Some(session_id) = &req.session_id {
        state
            .meta
            .record_exchange(session_id, req.session_title.as_deref());
    }

    tracing::info!(
        emotion = %emotion,
        turns = req.messages.len(),
        session_id = req.session_id.as_deref().unwrap_or("-"),
        "chat exchange completed"
    );
    Ok(Json(ChatResponse { reply, emotion }))
}

/// Aggregate counts. Never errors: internal failures already degrade to
/// zeros inside the stores.
async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        sessions: state.meta.session_count(),
        total_messages: state.meta.total_messages(),
        training_pairs: state.exporter.training_pairs(),
        data_size_kb: state.exporter.total_size_kb(),
    })
}
