use axum::{
    extract::State,
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::app::AppState;

fn cors_headers(methods: &'static str) -> [(HeaderName, &'static str); 3] {
    [
        (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        (header::ACCESS_CONTROL_ALLOW_METHODS, methods),
        (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
    ]
}

/// GET /api/events - Published events with organizer, earliest first
pub async fn list(State(state): State<AppState>) -> Response {
    match state.events.find_published().await {
        Ok(events) => {
            let count = events.len();
            (
                StatusCode::OK,
                cors_headers("GET"),
                Json(json!({
                    "success": true,
                    "events": events,
                    "count": count
                })),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Error fetching events: {}", e);
            let message = e.to_string();
            let error = if message.is_empty() {
                "Failed to fetch events".to_string()
            } else {
                message
            };
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                cors_headers("GET"),
                Json(json!({
                    "success": false,
                    "error": error,
                    "events": []
                })),
            )
                .into_response()
        }
    }
}

/// OPTIONS /api/events - Preflight
pub async fn preflight() -> impl IntoResponse {
    (StatusCode::NO_CONTENT, cors_headers("GET, OPTIONS"))
}
