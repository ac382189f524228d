//! Full session store: sessions, the active-session pointer, and the
//! persona identity, each under a fixed well-known key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use kokoro_core::types::{Emotion, Identity, Role, Session};

use crate::kv::KvStore;

const KEY_SESSIONS: &str = "sessions";
const KEY_ACTIVE_SESSION: &str = "active_session";
const KEY_IDENTITY: &str = "identity";

/// Owns all session and message records. Operations on a non-existent
/// session id are silent no-ops; callers check existence first when it
/// matters.
pub struct SessionStore<K: KvStore> {
    kv: K,
}

impl<K: KvStore> SessionStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    fn sessions(&self) -> HashMap<String, Session> {
        self.kv
            .get(KEY_SESSIONS)
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }

    fn save_sessions(&self, sessions: &HashMap<String, Session>) {
        match serde_json::to_value(sessions) {
            Ok(v) => self.kv.set(KEY_SESSIONS, v),
            Err(e) => tracing::warn!(error = %e, "failed to encode sessions"),
        }
    }

    /// Allocate a new empty session and return its id.
    pub fn create_session(&self) -> String {
        let session = Session::new();
        let id = session.id.clone();
        let mut sessions = self.sessions();
        sessions.insert(id.clone(), session);
        self.save_sessions(&sessions);
        tracing::debug!(session_id = %id, "created session");
        id
    }

    pub fn get_session(&self, id: &str) -> Option<Session> {
        self.sessions().remove(id)
    }

    /// All sessions, most recently updated first.
    pub fn list_sessions(&self) -> Vec<Session> {
        let mut all: Vec<Session> = self.sessions().into_values().collect();
        all.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        all
    }

    /// Remove a session permanently. Clears the active pointer iff it
    /// pointed at the deleted session.
    pub fn delete_session(&self, id: &str) {
        let mut sessions = self.sessions();
        if sessions.remove(id).is_some() {
            self.save_sessions(&sessions);
            tracing::debug!(session_id = %id, "deleted session");
        }
        if self.active_session().as_deref() == Some(id) {
            self.clear_active_session();
        }
    }

    /// Append a message in place, refreshing `updated_at`. The first user
    /// message sets the session title.
    pub fn append_message(&self, id: &str, role: Role, content: &str, emotion: Option<Emotion>) {
        let mut sessions = self.sessions();
        let Some(session) = sessions.get_mut(id) else {
            tracing::debug!(session_id = %id, "append to unknown session ignored");
            return;
        };
        session.append(role, content, emotion);
        self.save_sessions(&sessions);
    }

    // --- Active-session pointer ---

    pub fn active_session(&self) -> Option<String> {
        self.kv
            .get(KEY_ACTIVE_SESSION)
            .and_then(|v| serde_json::from_value(v).ok())
    }

    pub fn set_active_session(&self, id: &str) {
        self.kv.set(KEY_ACTIVE_SESSION, serde_json::Value::String(id.to_string()));
    }

    pub fn clear_active_session(&self) {
        self.kv.remove(KEY_ACTIVE_SESSION);
    }

    // --- Identity ---

    /// The persisted persona, or the stock default on first run.
    pub fn identity(&self) -> Identity {
        self.kv
            .get(KEY_IDENTITY)
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }

    pub fn save_identity(&self, identity: &Identity) {
        match serde_json::to_value(identity) {
            Ok(v) => self.kv.set(KEY_IDENTITY, v),
            Err(e) => tracing::warn!(error = %e, "failed to encode identity"),
        }
    }

    /// Wipe every session and the active pointer; identity survives.
    pub fn clear_all_sessions(&self) {
        self.save_sessions(&HashMap::new());
        self.clear_active_session();
    }

    /// Full dump of everything the store owns, plus instruction/input/output
    /// pairs built from consecutive user -> assistant exchanges.
    pub fn export_all(&self) -> ExportBundle {
        let identity = self.identity();
        let mut sessions = self.list_sessions();
        sessions.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        let mut training_data = Vec::new();
        for session in &sessions {
            for pair in session.messages.windows(2) {
                if pair[0].role == Role::User && pair[1].role == Role::Assistant {
                    training_data.push(TrainingPair {
                        instruction: identity.system_prompt.clone(),
                        input: pair[0].content.clone(),
                        output: pair[1].content.clone(),
                    });
                }
            }
        }

        ExportBundle {
            exported_at: Utc::now(),
            total_sessions: sessions.len(),
            total_messages: sessions.iter().map(|s| s.messages.len()).sum(),
            ai_identity: identity,
            sessions,
            training_data,
        }
    }
}

/// Instruction-tuning triple derived from one exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingPair {
    pub instruction: String,
    pub input: String,
    pub output: String,
}

/// Everything a user can take with them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub exported_at: DateTime<Utc>,
    pub ai_identity: Identity,
    pub total_sessions: usize,
    pub total_messages: usize,
    pub sessions: Vec<Session>,
    pub training_data: Vec<TrainingPair>,
}
