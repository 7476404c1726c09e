use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use famhub_core::{
    model::{MealPlan, MealType},
    store::KvStore,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{EntityKind, JsonArrayStore};

#[derive(Debug, Clone)]
pub struct MealDraft {
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub recipe: String,
    /// Already split from CSV input by the caller.
    pub ingredients: Vec<String>,
}

/// Meal plan repository.
pub struct MealRepo<S: KvStore> {
    inner: JsonArrayStore<MealPlan, S>,
}

impl<S: KvStore> MealRepo<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            inner: JsonArrayStore::new(store, EntityKind::Meals),
        }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Vec<MealPlan> {
        self.inner.load().await
    }

    #[instrument(skip(self, draft), fields(recipe = %draft.recipe))]
    pub async fn add(&self, draft: MealDraft) -> Result<MealPlan> {
        let meal = MealPlan {
            id: Uuid::new_v4(),
            date: draft.date,
            meal_type: draft.meal_type,
            recipe: draft.recipe,
            ingredients: draft.ingredients,
        };
        self.inner.append(meal.clone()).await?;
        Ok(meal)
    }
}
