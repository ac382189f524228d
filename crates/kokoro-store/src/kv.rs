//! Key-value backends for the session store.
//!
//! The store only needs a handful of well-known keys, so the backend is a
//! flat string-to-JSON map. Reads of missing or corrupt data degrade to
//! absent; writes log and drop on IO failure rather than surfacing errors
//! to callers.

use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&self, key: &str, value: Value);
    fn remove(&self, key: &str);
}

/// In-memory backend, used by tests and short-lived controllers.
#[derive(Debug, Default)]
pub struct MemoryKv {
    inner: Mutex<HashMap<String, Value>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> Option<Value> {
        self.inner.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) {
        self.inner.lock().unwrap().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.inner.lock().unwrap().remove(key);
    }
}

/// File backend: one JSON object holding every key, rewritten whole on each
/// write. Last writer wins; concurrent writers can lose updates.
#[derive(Debug)]
pub struct FileKv {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileKv {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::warn!(path = %parent.display(), error = %e, "failed to create store directory");
            }
        }
        Self { path, lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> HashMap<String, Value> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            Err(_) => HashMap::new(),
        }
    }

    fn write_all(&self, map: &HashMap<String, Value>) {
        match serde_json::to_string_pretty(map) {
            Ok(raw) => {
                if let Err(e) = fs::write(&self.path, raw) {
                    tracing::warn!(path = %self.path.display(), error = %e, "failed to write store file");
                }
            }
            Err(e) => tracing::warn!(error = %e, "failed to encode store file"),
        }
    }
}

impl KvStore for FileKv {
    fn get(&self, key: &str) -> Option<Value> {
        let _guard = self.lock.lock().unwrap();
        self.read_all().get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) {
        let _guard = self.lock.lock().unwrap();
        let mut map = self.read_all();
        map.insert(key.to_string(), value);
        self.write_all(&map);
    }

    fn remove(&self, key: &str) {
        let _guard = self.lock.lock().unwrap();
        let mut map = self.read_all();
        if map.remove(key).is_some() {
            self.write_all(&map);
        }
    }
}
