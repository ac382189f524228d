//! Application state shared across all handlers.

use std::sync::Arc;

use kokoro_client::CompletionClient;
use kokoro_core::{persona, KokoroConfig, Result};
use kokoro_export::TrainingExporter;
use kokoro_store::MetaStore;

/// Shared application state. Each incoming request is handled
/// independently against these services.
#[derive(Clone)]
pub struct AppState {
    pub meta: Arc<MetaStore>,
    pub exporter: Arc<TrainingExporter>,
    /// Absent when no API key is configured; chat requests then fail
    /// per-request, the process keeps running.
    pub client: Option<Arc<CompletionClient>>,
    /// The fixed persona prompt, hidden from clients.
    pub system_prompt: Arc<str>,
}

impl AppState {
    pub fn from_config(config: &KokoroConfig) -> Result<Self> {
        let meta = Arc::new(MetaStore::open(&config.data_dir)?);
        let exporter = Arc::new(TrainingExporter::open(&config.data_dir)?);
        let client = config
            .api_key
            .clone()
            .map(|key| Arc::new(CompletionClient::new(key, config.model.clone())));
        Ok(Self {
            meta,
            exporter,
            client,
            system_prompt: Arc::from(persona::DEFAULT_SYSTEM_PROMPT),
        })
    }
}
