use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::model::{empty_details, Event, EventDraft};
use super::time::{validate_submission, DateTimeInput, SubmissionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Event title is required")]
    MissingTitle,

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

impl FormError {
    pub fn reason(&self) -> &'static str {
        match self {
            FormError::MissingTitle => "missing-title",
            FormError::Submission(err) => err.reason(),
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            FormError::MissingTitle => "title",
            FormError::Submission(err) => err.field(),
        }
    }
}

/// Payload handed to the event store: create when `id` is absent, update otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSubmission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub location: String,
    pub starts_at: String,
    pub ends_at: String,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "empty_details")]
    pub details_json: Value,
}

impl EventSubmission {
    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    /// Re-run the form rules on a payload received over the wire.
    pub fn validate(&self, now: NaiveDateTime) -> Result<EventDraft, FormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::MissingTitle);
        }

        let interval = validate_submission(&self.starts_at, &self.ends_at, self.is_editing(), now)?;

        Ok(EventDraft {
            title: title.to_string(),
            location: self.location.clone(),
            starts_at: interval.starts_at,
            ends_at: interval.ends_at,
            all_day: self.all_day,
            description: self
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            details_json: self.details_json.clone(),
        })
    }
}

/// Create/edit form state for a single event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventForm {
    pub id: Option<i64>,
    pub title: String,
    pub location: String,
    pub all_day: bool,
    pub description: String,
    pub details_json: Value,
    pub start: DateTimeInput,
    pub end: DateTimeInput,
}

impl EventForm {
    /// Blank form: both pickers sit on today, neither time is chosen yet.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            id: None,
            title: String::new(),
            location: String::new(),
            all_day: false,
            description: String::new(),
            details_json: empty_details(),
            start: DateTimeInput::new(Some(today), ""),
            end: DateTimeInput::new(Some(today), ""),
        }
    }

    pub fn edit(event: &Event) -> Self {
        Self {
            id: Some(event.id),
            title: event.title.clone(),
            location: event.location.clone(),
            all_day: event.all_day,
            description: event.description.clone().unwrap_or_default(),
            details_json: event.details_json.clone(),
            start: DateTimeInput::from_timestamp(event.starts_at),
            end: DateTimeInput::from_timestamp(event.ends_at),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    pub fn starts_at_value(&self) -> String {
        self.start.composed()
    }

    pub fn ends_at_value(&self) -> String {
        self.end.composed()
    }

    fn to_submission(&self) -> EventSubmission {
        EventSubmission {
            id: self.id,
            title: self.title.clone(),
            location: self.location.clone(),
            starts_at: self.starts_at_value(),
            ends_at: self.ends_at_value(),
            all_day: self.all_day,
            description: Some(self.description.clone()).filter(|d| !d.is_empty()),
            details_json: self.details_json.clone(),
        }
    }

    /// Build the store payload, or the first rule the form breaks.
    pub fn submit(&self, now: NaiveDateTime) -> Result<EventSubmission, FormError> {
        let submission = self.to_submission();
        submission.validate(now)?;
        Ok(submission)
    }
}
