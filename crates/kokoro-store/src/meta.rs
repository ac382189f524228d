//! Server-side session metadata: a single `sessions.json` keyed by id.
//!
//! The proxy never stores message bodies; it only counts exchanges so the
//! stats endpoint has something to report.

use chrono::Utc;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use kokoro_core::types::SessionMeta;
use kokoro_core::{KokoroError, Result};

const SESSIONS_FILE: &str = "sessions.json";

pub struct MetaStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl MetaStore {
    /// Open (creating the data directory and an empty `sessions.json` if
    /// needed).
    pub fn open(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir)
            .map_err(|e| KokoroError::Storage(format!("create {}: {e}", data_dir.display())))?;
        let path = data_dir.join(SESSIONS_FILE);
        if !path.exists() {
            fs::write(&path, "{}")
                .map_err(|e| KokoroError::Storage(format!("init {}: {e}", path.display())))?;
        }
        Ok(Self { path, lock: Mutex::new(()) })
    }

    fn read_all(&self) -> HashMap<String, SessionMeta> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            Err(_) => HashMap::new(),
        }
    }

    fn write_all(&self, map: &HashMap<String, SessionMeta>) {
        match serde_json::to_string_pretty(map) {
            Ok(raw) => {
                if let Err(e) = fs::write(&self.path, raw) {
                    tracing::warn!(path = %self.path.display(), error = %e, "failed to write session metadata");
                }
            }
            Err(e) => tracing::warn!(error = %e, "failed to encode session metadata"),
        }
    }

    /// Record one successful user/assistant exchange against a session,
    /// creating its record on first sight. +2 messages, title refreshed
    /// when the client supplied one.
    pub fn record_exchange(&self, session_id: &str, title: Option<&str>) {
        let _guard = self.lock.lock().unwrap();
        let mut all = self.read_all();
        let meta = all
            .entry(session_id.to_string())
            .or_insert_with(|| SessionMeta::new(session_id, title.unwrap_or("New chat")));
        meta.message_count += 2;
        if let Some(t) = title {
            meta.title = t.to_string();
        }
        meta.updated_at = Utc::now();
        self.write_all(&all);
    }

    pub fn get(&self, session_id: &str) -> Option<SessionMeta> {
        let _guard = self.lock.lock().unwrap();
        self.read_all().remove(session_id)
    }

    pub fn session_count(&self) -> usize {
        let _guard = self.lock.lock().unwrap();
        self.read_all().len()
    }

    pub fn total_messages(&self) -> usize {
        let _guard = self.lock.lock().unwrap();
        self.read_all().values().map(|m| m.message_count).sum()
    }
}
