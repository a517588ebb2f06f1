//! Event time composition and submission validation.
//!
//! A date picker and a time-of-day input are held separately per side of the
//! interval. The submittable value is derived from both on every read and is
//! a local wall-clock string (`YYYY-MM-DDTHH:MM`) with no offset attached.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use thiserror::Error;

/// Wire format for composed timestamps.
pub const COMPOSED_FORMAT: &str = "%Y-%m-%dT%H:%M";

const TIME_FORMAT: &str = "%H:%M";

/// Combine a calendar day and a `HH:MM` clock string.
///
/// Returns an empty string when either side is unset, which downstream
/// validation reports as `invalid`. Hours and minutes are re-padded, so
/// `"9:05"` composes the same as `"09:05"`.
pub fn compose(date: Option<NaiveDate>, time: &str) -> String {
    let Some(date) = date else {
        return String::new();
    };
    let time = time.trim();
    if time.is_empty() {
        return String::new();
    }

    match NaiveTime::parse_from_str(time, TIME_FORMAT) {
        Ok(time) => date.and_time(time).format(COMPOSED_FORMAT).to_string(),
        Err(_) => String::new(),
    }
}

/// `HH:MM` for a stored timestamp, used to seed the time input when editing.
pub fn to_time_string(at: NaiveDateTime) -> String {
    at.format(TIME_FORMAT).to_string()
}

/// Parse a composed timestamp back into a wall-clock instant.
pub fn parse_composed(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), COMPOSED_FORMAT).ok()
}

/// Calendar floor shared by both pickers: nothing before the start of today.
pub fn is_selectable(date: NaiveDate, today: NaiveDate) -> bool {
    date >= today
}

/// Validated start/end pair, ready to persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInterval {
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("Please select valid start and end date and time")]
    Invalid,

    #[error("End date can't be earlier than start date")]
    EndBeforeStart,

    #[error("Start date/time can't be in the past")]
    StartInPast,
}

impl SubmissionError {
    /// Stable slug reported to clients.
    pub fn reason(&self) -> &'static str {
        match self {
            SubmissionError::Invalid => "invalid",
            SubmissionError::EndBeforeStart => "end-before-start",
            SubmissionError::StartInPast => "start-in-past",
        }
    }

    /// Form field the rejection is attached to.
    pub fn field(&self) -> &'static str {
        match self {
            SubmissionError::EndBeforeStart => "endsAt",
            SubmissionError::Invalid | SubmissionError::StartInPast => "startsAt",
        }
    }
}

/// Check a composed start/end pair before it is persisted.
///
/// The past-start rule only applies to new events; an existing event that
/// already happened can still be edited in place.
pub fn validate_submission(
    start: &str,
    end: &str,
    is_editing: bool,
    now: NaiveDateTime,
) -> Result<EventInterval, SubmissionError> {
    let (Some(starts_at), Some(ends_at)) = (parse_composed(start), parse_composed(end)) else {
        return Err(SubmissionError::Invalid);
    };

    if starts_at > ends_at {
        return Err(SubmissionError::EndBeforeStart);
    }

    if !is_editing && starts_at < now {
        return Err(SubmissionError::StartInPast);
    }

    Ok(EventInterval { starts_at, ends_at })
}

/// Completion state of one date-and-time input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionState {
    Unset,
    DateOnly,
    TimeOnly,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("date {date} is before {floor} and cannot be selected")]
pub struct DateNotSelectable {
    pub date: NaiveDate,
    pub floor: NaiveDate,
}

/// One side (start or end) of the event interval as the user edits it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateTimeInput {
    date: Option<NaiveDate>,
    time: String,
    picker_open: bool,
}

impl DateTimeInput {
    pub fn new(date: Option<NaiveDate>, time: impl Into<String>) -> Self {
        Self {
            date,
            time: time.into(),
            picker_open: false,
        }
    }

    /// Seed from a stored timestamp.
    pub fn from_timestamp(at: NaiveDateTime) -> Self {
        Self::new(Some(at.date()), to_time_string(at))
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn picker_open(&self) -> bool {
        self.picker_open
    }

    pub fn set_picker_open(&mut self, open: bool) {
        self.picker_open = open;
    }

    pub fn state(&self) -> SelectionState {
        match (self.date.is_some(), !self.time.trim().is_empty()) {
            (false, false) => SelectionState::Unset,
            (true, false) => SelectionState::DateOnly,
            (false, true) => SelectionState::TimeOnly,
            (true, true) => SelectionState::Complete,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state() == SelectionState::Complete
    }

    /// Apply a calendar selection. Disabled days leave everything untouched,
    /// any accepted selection (including clearing) closes the picker.
    pub fn select_date(
        &mut self,
        date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<(), DateNotSelectable> {
        if let Some(date) = date {
            if !is_selectable(date, today) {
                return Err(DateNotSelectable { date, floor: today });
            }
        }

        self.date = date;
        self.picker_open = false;
        Ok(())
    }

    pub fn set_time(&mut self, time: impl Into<String>) {
        self.time = time.into();
    }

    /// Derived submission value, recomputed on every call.
    pub fn composed(&self) -> String {
        compose(self.date, &self.time)
    }
}
