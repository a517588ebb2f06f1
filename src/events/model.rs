use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub location: String,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub all_day: bool,
    pub description: Option<String>,
    pub details_json: Value,
    pub published: bool,
    pub organizer_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organizer {
    pub name: String,
    pub role: String,
}

/// Listing shape: the event plus its organizer's public profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventWithOrganizer {
    #[serde(flatten)]
    pub event: Event,
    pub organizer: Option<Organizer>,
}

/// Empty rich-text document used when an event has no details yet.
pub fn empty_details() -> Value {
    json!({ "type": "doc", "content": [] })
}

/// Validated event fields, the input to [`EventStore`](super::store::EventStore)
/// writes.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub location: String,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub all_day: bool,
    pub description: Option<String>,
    pub details_json: Value,
}
