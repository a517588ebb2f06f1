use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::DatabaseError;
use crate::events::{Event, EventDraft, EventStore, EventWithOrganizer, Organizer};

/// In-memory event store for router tests
#[derive(Default)]
pub struct MemoryEventStore {
    events: RwLock<Vec<Event>>,
    users: RwLock<HashMap<Uuid, Organizer>>,
}

impl MemoryEventStore {
    pub fn with_events(events: Vec<Event>) -> Self {
        Self {
            events: RwLock::new(events),
            users: RwLock::default(),
        }
    }

    /// Copy of everything stored so far
    pub async fn snapshot(&self) -> Vec<Event> {
        self.events.read().await.clone()
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn find_published(&self) -> Result<Vec<EventWithOrganizer>, DatabaseError> {
        let mut published: Vec<Event> = self.events.read().await.iter().filter(|e| e.published).cloned().collect();
        published.sort_by_key(|e| e.starts_at);

        let users = self.users.read().await;
        Ok(published
            .into_iter()
            .map(|event| {
                let organizer = event.organizer_id.and_then(|id| users.get(&id).cloned());
                EventWithOrganizer { event, organizer }
            })
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Event>, DatabaseError> {
        Ok(self.events.read().await.iter().find(|e| e.id == id).cloned())
    }

    async fn create(
        &self,
        organizer_id: Uuid,
        organizer: &Organizer,
        draft: &EventDraft,
    ) -> Result<Event, DatabaseError> {
        self.users.write().await.insert(organizer_id, organizer.clone());

        let mut events = self.events.write().await;
        let now = Utc::now();
        let event = Event {
            id: events.iter().map(|e| e.id).max().unwrap_or(0) + 1,
            title: draft.title.clone(),
            location: draft.location.clone(),
            starts_at: draft.starts_at,
            ends_at: draft.ends_at,
            all_day: draft.all_day,
            description: draft.description.clone(),
            details_json: draft.details_json.clone(),
            published: true,
            organizer_id: Some(organizer_id),
            created_at: now,
            updated_at: now,
        };
        events.push(event.clone());
        Ok(event)
    }

    async fn update(&self, id: i64, draft: &EventDraft) -> Result<Event, DatabaseError> {
        let mut events = self.events.write().await;
        let event = events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| DatabaseError::NotFound(format!("Event {} not found", id)))?;

        event.title = draft.title.clone();
        event.location = draft.location.clone();
        event.starts_at = draft.starts_at;
        event.ends_at = draft.ends_at;
        event.all_day = draft.all_day;
        event.description = draft.description.clone();
        event.details_json = draft.details_json.clone();
        event.updated_at = Utc::now();
        Ok(event.clone())
    }
}

/// Store whose every call fails the way an unconfigured database does
pub struct FailingEventStore;

#[async_trait]
impl EventStore for FailingEventStore {
    async fn find_published(&self) -> Result<Vec<EventWithOrganizer>, DatabaseError> {
        Err(DatabaseError::ConfigMissing("DATABASE_URL"))
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<Event>, DatabaseError> {
        Err(DatabaseError::ConfigMissing("DATABASE_URL"))
    }

    async fn create(
        &self,
        _organizer_id: Uuid,
        _organizer: &Organizer,
        _draft: &EventDraft,
    ) -> Result<Event, DatabaseError> {
        Err(DatabaseError::ConfigMissing("DATABASE_URL"))
    }

    async fn update(&self, _id: i64, _draft: &EventDraft) -> Result<Event, DatabaseError> {
        Err(DatabaseError::ConfigMissing("DATABASE_URL"))
    }
}
