use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use uuid::Uuid;

use crate::auth::{Claims, SessionKeys};
use crate::error::ApiError;
use crate::routing::cookie_value;

/// Authenticated user context, attached to the request by the gate
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub name: String,
    pub role: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            name: claims.name,
            role: claims.role,
        }
    }
}

/// Handlers that take `AuthUser` reject anonymous requests with 401
#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}

/// Session token from the Authorization header, falling back to the session cookie
pub fn extract_session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    if let Some(auth_str) = headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        match bearer_token(auth_str) {
            Ok(token) => return Some(token),
            Err(msg) => {
                tracing::debug!("Ignoring Authorization header: {}", msg);
            }
        }
    }

    cookie_value(headers, cookie_name).filter(|token| !token.trim().is_empty())
}

fn bearer_token(auth_str: &str) -> Result<String, &'static str> {
    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or("Authorization header must use Bearer token format")?;
    if token.trim().is_empty() {
        return Err("Empty JWT token");
    }
    Ok(token.trim().to_string())
}

/// Look up the session identity for a request, if it carries a valid token
pub fn authenticate(headers: &HeaderMap, keys: &SessionKeys, cookie_name: &str) -> Option<AuthUser> {
    let token = extract_session_token(headers, cookie_name)?;
    match keys.verify(&token) {
        Ok(claims) => Some(AuthUser::from(claims)),
        Err(e) => {
            tracing::debug!("Session token rejected: {}", e);
            None
        }
    }
}
