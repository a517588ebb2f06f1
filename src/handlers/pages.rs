use axum::{
    extract::Extension,
    http::Uri,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::ApiError;
use crate::middleware::ApiResponse;
use crate::routing::ResolvedLocale;

/// Fallback for everything the router does not own.
///
/// Localized page paths are acknowledged with the locale they resolved to;
/// rendering them is the frontend's job.
pub async fn page(uri: Uri, locale: Option<Extension<ResolvedLocale>>) -> Response {
    match locale {
        Some(Extension(resolved)) => ApiResponse::success(json!({
            "locale": resolved.locale,
            "path": uri.path(),
        }))
        .into_response(),
        None => ApiError::not_found(format!("Route {} not found", uri.path())).into_response(),
    }
}
