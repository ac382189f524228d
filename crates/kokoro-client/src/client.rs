//! Completion client: one request, one reply, no retries, no timeout.

use reqwest::Client;

use kokoro_core::types::{Role, Turn};
use kokoro_core::{KokoroError, Result};

use crate::models::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct CompletionClient {
    http: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl CompletionClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point at a different endpoint (tests use a local mock).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn translate_role(role: Role) -> &'static str {
        match role {
            Role::User => "user",
            Role::Assistant => "model",
        }
    }

    /// Pull a message out of the upstream JSON error body, falling back to
    /// a generic status-coded message.
    fn upstream_message(status: u16, body: &str) -> String {
        serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
            .unwrap_or_else(|| format!("API Error: {status}"))
    }

    /// Send the full history plus the persona instruction, returning the
    /// first candidate's text. Exactly one attempt; the only suspension
    /// point is the network call.
    pub async fn complete(&self, history: &[Turn], system_prompt: &str) -> Result<String> {
        let contents = history
            .iter()
            .map(|t| Content::text(Some(Self::translate_role(t.role)), t.content.clone()))
            .collect();

        let request = GenerateContentRequest {
            contents,
            system_instruction: Content::text(None, system_prompt),
            generation_config: GenerationConfig::default(),
        };

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        tracing::debug!(model = %self.model, turns = history.len(), "completion request");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| KokoroError::Upstream {
                status: 500,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = Self::upstream_message(status.as_u16(), &body);
            tracing::warn!(status = status.as_u16(), %message, "upstream rejected completion");
            return Err(KokoroError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            KokoroError::Upstream {
                status: 500,
                message: format!("invalid upstream response: {e}"),
            }
        })?;

        parsed.first_text().ok_or(KokoroError::EmptyResponse)
    }
}
