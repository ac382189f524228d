//! JSON error responses for the HTTP API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use kokoro_core::KokoroError;

/// API error with status code and message. The wire shape is the flat
/// `{ "error": "<message>" }` object clients expect.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: msg.into() }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: msg.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

impl From<KokoroError> for ApiError {
    fn from(err: KokoroError) -> Self {
        match err {
            KokoroError::Validation(msg) => ApiError::bad_request(msg),
            // The upstream status is passed through verbatim.
            KokoroError::Upstream { status, message } => ApiError {
                status: StatusCode::from_u16(status)
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                message,
            },
            other => ApiError::internal(other.to_string()),
        }
    }
}
