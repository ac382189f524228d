use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::persona;

/// Message role. The chat history only ever contains these two; the system
/// prompt travels on a separate channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// Closed emotion vocabulary for assistant replies.
///
/// Wire names are the identifiers the tag protocol emits; `Explicit` keeps
/// the legacy identifier `sex1` so existing logs stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Shy,
    Angry,
    Sad,
    Thinking,
    Surprised,
    Love,
    Worried,
    #[serde(rename = "sex1")]
    Explicit,
}

impl Emotion {
    /// Fallback when a reply carries no tag or an unrecognized one.
    pub const DEFAULT: Emotion = Emotion::Happy;

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Shy => "shy",
            Emotion::Angry => "angry",
            Emotion::Sad => "sad",
            Emotion::Thinking => "thinking",
            Emotion::Surprised => "surprised",
            Emotion::Love => "love",
            Emotion::Worried => "worried",
            Emotion::Explicit => "sex1",
        }
    }

    /// Resolve a tag identifier against the closed vocabulary.
    pub fn from_identifier(ident: &str) -> Option<Emotion> {
        match ident {
            "happy" => Some(Emotion::Happy),
            "shy" => Some(Emotion::Shy),
            "angry" => Some(Emotion::Angry),
            "sad" => Some(Emotion::Sad),
            "thinking" => Some(Emotion::Thinking),
            "surprised" => Some(Emotion::Surprised),
            "love" => Some(Emotion::Love),
            "worried" => Some(Emotion::Worried),
            "sex1" => Some(Emotion::Explicit),
            _ => None,
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Only ever present on assistant messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion: Option<Emotion>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>, emotion: Option<Emotion>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
            emotion,
        }
    }
}

/// A role + content pair: the history shape the completion call and the
/// training logs consume, with no timestamps or emotions attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }
}

impl From<&Message> for Turn {
    fn from(msg: &Message) -> Self {
        Self::new(msg.role, msg.content.clone())
    }
}

/// Maximum title length in characters before truncation.
const TITLE_MAX_CHARS: usize = 40;

/// Derive a session title from the first user message: first 40 characters,
/// ellipsis marker when truncated. Character-based, so multibyte text is safe.
pub fn derive_title(content: &str) -> String {
    let mut title: String = content.chars().take(TITLE_MAX_CHARS).collect();
    if content.chars().count() > TITLE_MAX_CHARS {
        title.push_str("...");
    }
    title
}

/// One persisted conversation thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub title: String,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: format!("session_{}", Uuid::new_v4().simple()),
            title: persona::DEFAULT_SESSION_TITLE.to_string(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a message. The first user message also sets the title.
    /// Messages are append-only; callers never reorder or remove entries.
    pub fn append(&mut self, role: Role, content: impl Into<String>, emotion: Option<Emotion>) -> &Message {
        let msg = Message::new(role, content, emotion);
        let first_user = role == Role::User
            && !self.messages.iter().any(|m| m.role == Role::User);
        if first_user {
            self.title = derive_title(&msg.content);
        }
        self.messages.push(msg);
        self.updated_at = Utc::now();
        self.messages.last().unwrap()
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Session(id={}, title={:?}, messages={})", self.id, self.title, self.messages.len())
    }
}

/// Lightweight per-session record kept by the server proxy. The proxy never
/// stores message bodies, only exchange counts and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMeta {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub message_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionMeta {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            message_count: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The assistant persona: display name plus the system prompt sent with
/// every completion call. User-editable, persisted alongside the sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub system_prompt: String,
}

impl Default for Identity {
    fn default() -> Self {
        Self {
            name: persona::DEFAULT_PERSONA_NAME.to_string(),
            system_prompt: persona::DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}
