use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::database::{DatabaseError, DatabaseManager};

use super::model::{Event, EventDraft, EventWithOrganizer, Organizer};

/// Persistence for campus events
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Published events with their organizer, earliest start first
    async fn find_published(&self) -> Result<Vec<EventWithOrganizer>, DatabaseError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Event>, DatabaseError>;

    /// Insert a new published event owned by `organizer_id`, recording the
    /// organizer's current name and role alongside it
    async fn create(
        &self,
        organizer_id: Uuid,
        organizer: &Organizer,
        draft: &EventDraft,
    ) -> Result<Event, DatabaseError>;

    /// Replace the editable fields of an existing event
    async fn update(&self, id: i64, draft: &EventDraft) -> Result<Event, DatabaseError>;
}

/// PostgreSQL-backed store using the shared application pool
#[derive(Debug, Default, Clone)]
pub struct PgEventStore;

impl PgEventStore {
    pub fn new() -> Self {
        Self
    }

    async fn pool(&self) -> Result<PgPool, DatabaseError> {
        DatabaseManager::main_pool().await
    }
}

const EVENT_COLUMNS: &str = r#"
    e.id, e.title, e.location, e.starts_at, e.ends_at, e.all_day,
    e.description, e.details_json, e.published, e.organizer_id,
    e.created_at, e.updated_at
"#;

#[derive(FromRow)]
struct EventRow {
    id: i64,
    title: String,
    location: String,
    starts_at: NaiveDateTime,
    ends_at: NaiveDateTime,
    all_day: bool,
    description: Option<String>,
    details_json: Value,
    published: bool,
    organizer_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    organizer_name: Option<String>,
    organizer_role: Option<String>,
}

impl From<EventRow> for EventWithOrganizer {
    fn from(row: EventRow) -> Self {
        let organizer = match (row.organizer_name, row.organizer_role) {
            (Some(name), Some(role)) => Some(Organizer { name, role }),
            _ => None,
        };

        EventWithOrganizer {
            event: Event {
                id: row.id,
                title: row.title,
                location: row.location,
                starts_at: row.starts_at,
                ends_at: row.ends_at,
                all_day: row.all_day,
                description: row.description,
                details_json: row.details_json,
                published: row.published,
                organizer_id: row.organizer_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            organizer,
        }
    }
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn find_published(&self) -> Result<Vec<EventWithOrganizer>, DatabaseError> {
        let pool = self.pool().await?;
        let query = format!(
            r#"
            SELECT {EVENT_COLUMNS}, u.name AS organizer_name, u.role AS organizer_role
            FROM events e
            LEFT JOIN users u ON u.id = e.organizer_id
            WHERE e.published = true
            ORDER BY e.starts_at ASC
            "#
        );

        let rows = sqlx::query_as::<_, EventRow>(&query).fetch_all(&pool).await?;
        tracing::debug!("Loaded {} published events", rows.len());
        Ok(rows.into_iter().map(EventWithOrganizer::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Event>, DatabaseError> {
        let pool = self.pool().await?;
        let query = format!("SELECT {EVENT_COLUMNS} FROM events e WHERE e.id = $1");

        let event = sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(&pool)
            .await?;
        Ok(event)
    }

    async fn create(
        &self,
        organizer_id: Uuid,
        organizer: &Organizer,
        draft: &EventDraft,
    ) -> Result<Event, DatabaseError> {
        let pool = self.pool().await?;
        let mut tx = pool.begin().await?;

        // Session users are not provisioned ahead of time; keep the row the
        // foreign key points at in step with the token's claims.
        sqlx::query(
            r#"
            INSERT INTO users (id, name, role) VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, role = EXCLUDED.role
            "#,
        )
        .bind(organizer_id)
        .bind(&organizer.name)
        .bind(&organizer.role)
        .execute(&mut *tx)
        .await?;

        let query = r#"
            INSERT INTO events
                (title, location, starts_at, ends_at, all_day, description, details_json, published, organizer_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, true, $8)
            RETURNING id, title, location, starts_at, ends_at, all_day, description,
                      details_json, published, organizer_id, created_at, updated_at
        "#;

        let event = sqlx::query_as::<_, Event>(query)
            .bind(&draft.title)
            .bind(&draft.location)
            .bind(draft.starts_at)
            .bind(draft.ends_at)
            .bind(draft.all_day)
            .bind(&draft.description)
            .bind(&draft.details_json)
            .bind(organizer_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!("Created event {} ({}) for {}", event.id, event.title, organizer.name);
        Ok(event)
    }

    async fn update(&self, id: i64, draft: &EventDraft) -> Result<Event, DatabaseError> {
        let pool = self.pool().await?;
        let query = r#"
            UPDATE events SET
                title = $2, location = $3, starts_at = $4, ends_at = $5,
                all_day = $6, description = $7, details_json = $8, updated_at = now()
            WHERE id = $1
            RETURNING id, title, location, starts_at, ends_at, all_day, description,
                      details_json, published, organizer_id, created_at, updated_at
        "#;

        let event = sqlx::query_as::<_, Event>(query)
            .bind(id)
            .bind(&draft.title)
            .bind(&draft.location)
            .bind(draft.starts_at)
            .bind(draft.ends_at)
            .bind(draft.all_day)
            .bind(&draft.description)
            .bind(&draft.details_json)
            .fetch_optional(&pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Event {} not found", id)))?;

        tracing::info!("Updated event {}", event.id);
        Ok(event)
    }
}
