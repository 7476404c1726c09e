use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use thiserror::Error;

/// Namespace prefix for every key FamHub owns in the backing store.
pub const KEY_PREFIX: &str = "famhub";

/// Build the namespaced storage key for an entity kind (`famhub_<kind>`).
pub fn storage_key(kind: &str) -> String {
    format!("{KEY_PREFIX}_{kind}")
}

/// Errors produced by key-value store implementations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KvError {
    /// Requested key does not exist.
    #[error("entry not found for key: {key}")]
    NotFound { key: String },
    /// Underlying storage failure.
    #[error("storage failure: {reason}")]
    Storage { reason: String },
}

/// Contract for the persistent key-value namespace backing all entity
/// sequences and the session pointer. Values are opaque bytes; callers
/// serialize JSON into them. `remove` is idempotent.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Retrieve the value for a key.
    async fn get(&self, key: &str) -> Result<Vec<u8>, KvError>;

    /// Persist a value under a key, overwriting any existing entry.
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), KvError>;

    /// Remove a key and its value (idempotent).
    async fn remove(&self, key: &str) -> Result<(), KvError>;
}

/// In-memory store used by tests and smoke runs in place of the real
/// file-backed namespace.
#[derive(Debug, Default, Clone)]
pub struct InMemoryKvStore {
    inner: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for InMemoryKvStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>, KvError> {
        let map = self.inner.lock().map_err(|err| KvError::Storage {
            reason: format!("lock poisoned: {err}"),
        })?;

        map.get(key).cloned().ok_or_else(|| KvError::NotFound {
            key: key.to_string(),
        })
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), KvError> {
        let mut map = self.inner.lock().map_err(|err| KvError::Storage {
            reason: format!("lock poisoned: {err}"),
        })?;
        map.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), KvError> {
        let mut map = self.inner.lock().map_err(|err| KvError::Storage {
            reason: format!("lock poisoned: {err}"),
        })?;
        map.remove(key);
        Ok(())
    }
}
