use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};

use crate::database::DatabaseManager;
use crate::routing::PUBLIC_ROUTES;

/// GET /api/info - Service description
pub async fn info() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Campus Guide API",
            "version": version,
            "endpoints": {
                "events": "/api/events (GET public, POST session required)",
                "guide": "/api/guide-cards (public)",
                "health": "/api/health (public)",
                "pages": "/:locale/* (gated by the public route list)",
            },
            "public_routes": PUBLIC_ROUTES,
        }
    }))
}

/// GET /api/health - Liveness plus database reachability
pub async fn health() -> impl IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
