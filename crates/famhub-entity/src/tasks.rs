use std::sync::Arc;

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use famhub_core::{
    model::{Priority, Task, TaskStatus},
    store::KvStore,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{EntityKind, JsonArrayStore};

/// Input for a new task; status and points are derived, not supplied.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub assigned_to: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub category: String,
}

/// Task repository backed by the keyed-array store.
pub struct TaskRepo<S: KvStore> {
    inner: JsonArrayStore<Task, S>,
}

impl<S: KvStore> TaskRepo<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            inner: JsonArrayStore::new(store, EntityKind::Tasks),
        }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Vec<Task> {
        self.inner.load().await
    }

    /// Create a task in the pending state with points derived from priority.
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn create(&self, draft: TaskDraft) -> Result<Task> {
        let task = Task {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            assigned_to: draft.assigned_to,
            due_date: draft.due_date,
            priority: draft.priority,
            status: TaskStatus::Pending,
            category: draft.category,
            points: draft.priority.points(),
            created_at: Utc::now(),
            completed_at: None,
        };
        self.inner.append(task.clone()).await?;
        Ok(task)
    }

    /// Change a task's status. `completed_at` is present exactly while the
    /// task is completed.
    #[instrument(skip(self))]
    pub async fn set_status(&self, id: Uuid, status: TaskStatus) -> Result<Task> {
        let mut tasks = self.inner.load().await;
        let mut updated: Option<Task> = None;
        for task in &mut tasks {
            if task.id == id {
                task.status = status;
                task.completed_at = if status == TaskStatus::Completed {
                    Some(Utc::now())
                } else {
                    None
                };
                updated = Some(task.clone());
                break;
            }
        }
        let updated = updated.ok_or_else(|| anyhow::anyhow!("task not found"))?;
        self.inner.save(&tasks).await?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use famhub_core::store::InMemoryKvStore;

    use super::*;

    fn draft(priority: Priority) -> TaskDraft {
        TaskDraft {
            title: "Take out the bins".into(),
            description: "Before Tuesday".into(),
            assigned_to: "Emma".into(),
            due_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            priority,
            category: "Cleaning".into(),
        }
    }

    #[tokio::test]
    async fn create_derives_points_from_priority() {
        let repo = TaskRepo::new(Arc::new(InMemoryKvStore::new()));
        let high = repo.create(draft(Priority::High)).await.expect("create");
        let medium = repo.create(draft(Priority::Medium)).await.expect("create");
        let low = repo.create(draft(Priority::Low)).await.expect("create");

        assert_eq!(high.points, 30);
        assert_eq!(medium.points, 20);
        assert_eq!(low.points, 10);
        assert_eq!(high.status, TaskStatus::Pending);
        assert!(high.completed_at.is_none());
    }

    #[tokio::test]
    async fn completed_at_tracks_the_completed_state() {
        let repo = TaskRepo::new(Arc::new(InMemoryKvStore::new()));
        let task = repo.create(draft(Priority::Medium)).await.expect("create");

        let started = repo
            .set_status(task.id, TaskStatus::InProgress)
            .await
            .expect("start");
        assert!(started.completed_at.is_none());

        let done = repo
            .set_status(task.id, TaskStatus::Completed)
            .await
            .expect("complete");
        assert!(done.completed_at.is_some());

        // Reopening clears the completion stamp.
        let reopened = repo
            .set_status(task.id, TaskStatus::Pending)
            .await
            .expect("reopen");
        assert!(reopened.completed_at.is_none());
    }

    #[tokio::test]
    async fn set_status_on_unknown_id_fails() {
        let repo = TaskRepo::new(Arc::new(InMemoryKvStore::new()));
        let err = repo
            .set_status(Uuid::new_v4(), TaskStatus::Completed)
            .await
            .expect_err("unknown id");
        assert!(err.to_string().contains("task not found"));
    }

    #[tokio::test]
    async fn list_preserves_creation_order() {
        let repo = TaskRepo::new(Arc::new(InMemoryKvStore::new()));
        let first = repo.create(draft(Priority::Low)).await.expect("create");
        let second = repo.create(draft(Priority::High)).await.expect("create");

        let tasks = repo.list().await;
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, first.id);
        assert_eq!(tasks[1].id, second.id);
    }
}
