//! Session persistence for Kokoro.
//!
//! Two stores live here, one per client variant: [`SessionStore`] holds
//! complete sessions (messages included) behind a key-value backend, the
//! way the embedded client persists them; [`MetaStore`] is the server
//! proxy's lightweight `sessions.json` of per-session counters.

pub mod kv;
pub mod meta;
pub mod store;

pub use kv::{FileKv, KvStore, MemoryKv};
pub use meta::MetaStore;
pub use store::{ExportBundle, SessionStore, TrainingPair};
