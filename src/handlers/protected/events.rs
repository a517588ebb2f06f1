use axum::{extract::State, Json};
use chrono::Local;

use crate::app::AppState;
use crate::error::ApiError;
use crate::events::{Event, EventSubmission, Organizer};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

const ADMIN_ROLE: &str = "admin";

/// POST /api/events - Create an event, or update it when the payload has an id
///
/// The payload goes through the same rules as the event form, judged against
/// the server's local wall clock.
pub async fn upsert(
    State(state): State<AppState>,
    user: AuthUser,
    Json(submission): Json<EventSubmission>,
) -> ApiResult<Event> {
    let draft = submission.validate(Local::now().naive_local())?;

    let Some(id) = submission.id else {
        let organizer = Organizer {
            name: user.name.clone(),
            role: user.role.clone(),
        };
        let event = state.events.create(user.user_id, &organizer, &draft).await?;
        return Ok(ApiResponse::created(event));
    };

    let existing = state
        .events
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Event {} not found", id)))?;

    if existing.organizer_id != Some(user.user_id) && user.role != ADMIN_ROLE {
        tracing::warn!("User {} tried to edit event {} they do not organize", user.user_id, id);
        return Err(ApiError::forbidden("Only the organizer can edit this event"));
    }

    let event = state.events.update(id, &draft).await?;
    Ok(ApiResponse::success(event))
}
