//! Core types for the Kokoro chat system: sessions, messages, the
//! emotion-tag protocol, error taxonomy, and configuration.

pub mod config;
pub mod emotion;
pub mod error;
pub mod persona;
pub mod types;

pub use config::KokoroConfig;
pub use emotion::parse_tagged_reply;
pub use error::{KokoroError, Result};
pub use types::{Emotion, Identity, Message, Role, Session, SessionMeta, Turn};
