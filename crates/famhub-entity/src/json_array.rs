use std::{marker::PhantomData, sync::Arc};

use anyhow::Result;
use famhub_core::store::{KvError, KvStore};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{instrument, warn};

use crate::EntityKind;

/// Generic persistence for one entity kind: the whole sequence lives as a
/// JSON array under a single namespaced key. Kind-agnostic; the entity type
/// is fixed only at the call site.
pub struct JsonArrayStore<T, S> {
    store: Arc<S>,
    key: String,
    _entity: PhantomData<fn() -> T>,
}

impl<T, S> JsonArrayStore<T, S>
where
    T: Serialize + DeserializeOwned + Send + Sync,
    S: KvStore,
{
    pub fn new(store: Arc<S>, kind: EntityKind) -> Self {
        Self {
            store,
            key: kind.storage_key(),
            _entity: PhantomData,
        }
    }

    /// Read the stored sequence. Never fails: a missing key, an unparseable
    /// payload, or a storage failure all read as "no data yet". Anything
    /// other than a missing key is logged.
    #[instrument(skip(self), fields(key = %self.key))]
    pub async fn load(&self) -> Vec<T> {
        match self.store.get(&self.key).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(items) => items,
                Err(err) => {
                    warn!(%err, "corrupt payload, treating as empty");
                    Vec::new()
                }
            },
            Err(KvError::NotFound { .. }) => Vec::new(),
            Err(err) => {
                warn!(%err, "read failed, treating as empty");
                Vec::new()
            }
        }
    }

    /// Serialize the full sequence and overwrite the stored value
    /// unconditionally (last-write-wins).
    #[instrument(skip_all, fields(key = %self.key, count = items.len()))]
    pub async fn save(&self, items: &[T]) -> Result<()> {
        let bytes = serde_json::to_vec(items)?;
        self.store
            .set(&self.key, &bytes)
            .await
            .map_err(|e| anyhow::anyhow!(e.to_string()))
    }

    /// Load, push, save. The append idiom behind every create operation.
    pub async fn append(&self, item: T) -> Result<()> {
        let mut items = self.load().await;
        items.push(item);
        self.save(&items).await
    }
}
