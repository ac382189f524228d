use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KokoroConfig {
    pub server: ServerConfig,
    /// Directory holding `sessions.json` and the training logs.
    pub data_dir: PathBuf,
    /// Completion API key. Absent means chat requests fail per-request with
    /// a configuration error; the process still starts.
    pub api_key: Option<String>,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for KokoroConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 3000,
            },
            data_dir: PathBuf::from("data"),
            api_key: None,
            model: "gemini-2.0-flash".into(),
        }
    }
}

impl KokoroConfig {
    /// Defaults overlaid with `GEMINI_API_KEY`, `PORT`, `KOKORO_DATA_DIR`
    /// and `KOKORO_MODEL` from the environment.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(key) = env::var("GEMINI_API_KEY").ok().filter(|k| !k.trim().is_empty()) {
            cfg.api_key = Some(key);
        }
        if let Some(port) = env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            cfg.server.port = port;
        }
        if let Ok(dir) = env::var("KOKORO_DATA_DIR") {
            cfg.data_dir = PathBuf::from(dir);
        }
        if let Ok(model) = env::var("KOKORO_MODEL") {
            cfg.model = model;
        }
        cfg
    }
}
