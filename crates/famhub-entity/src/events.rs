use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use famhub_core::{
    model::CalendarEvent,
    store::KvStore,
    views::{partition_events, EventPartition},
};
use tracing::instrument;
use uuid::Uuid;

use crate::{EntityKind, JsonArrayStore};

#[derive(Debug, Clone)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    /// Already split from CSV input by the caller.
    pub attendees: Vec<String>,
    pub color: String,
}

/// Calendar event repository.
pub struct EventRepo<S: KvStore> {
    inner: JsonArrayStore<CalendarEvent, S>,
}

impl<S: KvStore> EventRepo<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            inner: JsonArrayStore::new(store, EntityKind::Events),
        }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Vec<CalendarEvent> {
        self.inner.load().await
    }

    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn add(&self, draft: EventDraft) -> Result<CalendarEvent> {
        let event = CalendarEvent {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            date: draft.date,
            end_date: draft.end_date,
            attendees: draft.attendees,
            color: draft.color,
            recurring: false,
            created_at: Utc::now(),
        };
        self.inner.append(event.clone()).await?;
        Ok(event)
    }

    /// Events split around `now` for display: upcoming ascending, past
    /// descending truncated to the five most recent.
    #[instrument(skip(self))]
    pub async fn partition(&self, now: DateTime<Utc>) -> EventPartition {
        partition_events(&self.inner.load().await, now)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use famhub_core::store::InMemoryKvStore;

    use super::*;

    fn draft(title: &str, date: DateTime<Utc>) -> EventDraft {
        EventDraft {
            title: title.into(),
            description: String::new(),
            date,
            end_date: None,
            attendees: vec!["Mom".into(), "Dad".into()],
            color: "#3b82f6".into(),
        }
    }

    #[tokio::test]
    async fn partition_separates_future_from_past() {
        let repo = EventRepo::new(Arc::new(InMemoryKvStore::new()));
        let now = Utc::now();
        repo.add(draft("yesterday", now - Duration::days(1)))
            .await
            .expect("add");
        repo.add(draft("tomorrow", now + Duration::days(1)))
            .await
            .expect("add");
        repo.add(draft("later", now + Duration::days(2)))
            .await
            .expect("add");

        let partition = repo.partition(now).await;
        let upcoming: Vec<&str> = partition.upcoming.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(upcoming, vec!["tomorrow", "later"]);
        let past: Vec<&str> = partition.past.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(past, vec!["yesterday"]);
    }

    #[tokio::test]
    async fn add_keeps_attendees_and_optional_end_date() {
        let repo = EventRepo::new(Arc::new(InMemoryKvStore::new()));
        let start = Utc::now() + Duration::days(3);
        let mut draft = draft("swim meet", start);
        draft.end_date = Some(start + Duration::hours(2));

        let event = repo.add(draft).await.expect("add");
        assert_eq!(event.attendees, vec!["Mom", "Dad"]);
        assert_eq!(event.end_date, Some(start + Duration::hours(2)));

        let listed = repo.list().await;
        assert_eq!(listed, vec![event]);
    }
}
