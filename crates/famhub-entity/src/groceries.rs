use std::sync::Arc;

use anyhow::Result;
use famhub_core::{model::GroceryItem, store::KvStore};
use tracing::instrument;
use uuid::Uuid;

use crate::{EntityKind, JsonArrayStore};

#[derive(Debug, Clone)]
pub struct GroceryDraft {
    pub name: String,
    pub quantity: u32,
    pub category: String,
    pub added_by: String,
}

/// Grocery list repository.
pub struct GroceryRepo<S: KvStore> {
    inner: JsonArrayStore<GroceryItem, S>,
}

impl<S: KvStore> GroceryRepo<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            inner: JsonArrayStore::new(store, EntityKind::Grocery),
        }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Vec<GroceryItem> {
        self.inner.load().await
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn add(&self, draft: GroceryDraft) -> Result<GroceryItem> {
        let item = GroceryItem {
            id: Uuid::new_v4(),
            name: draft.name,
            quantity: draft.quantity,
            category: draft.category,
            checked: false,
            added_by: draft.added_by,
        };
        self.inner.append(item.clone()).await?;
        Ok(item)
    }

    /// Flip an item's checked state.
    #[instrument(skip(self))]
    pub async fn toggle(&self, id: Uuid) -> Result<GroceryItem> {
        let mut items = self.inner.load().await;
        let mut updated: Option<GroceryItem> = None;
        for item in &mut items {
            if item.id == id {
                item.checked = !item.checked;
                updated = Some(item.clone());
                break;
            }
        }
        let updated = updated.ok_or_else(|| anyhow::anyhow!("grocery item not found"))?;
        self.inner.save(&items).await?;
        Ok(updated)
    }
}
