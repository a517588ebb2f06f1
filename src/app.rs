use std::sync::Arc;

use axum::{
    middleware,
    routing::get,
    Router,
};
use tower::Layer;
use tower_http::trace::TraceLayer;

use crate::events::{EventStore, PgEventStore};
use crate::handlers::{pages, protected, public};
use crate::middleware::{gate_middleware, Gate};

#[derive(Clone)]
pub struct AppState {
    pub events: Arc<dyn EventStore>,
}

impl AppState {
    pub fn new(events: Arc<dyn EventStore>) -> Self {
        Self { events }
    }

    pub fn postgres() -> Self {
        Self::new(Arc::new(PgEventStore::new()))
    }
}

/// Full application: the gate, then routing.
///
/// The gate wraps the router instead of being added with `Router::layer`, so a
/// locale rewrite changes which route the request lands on.
pub fn app(state: AppState, gate: Arc<Gate>) -> Router {
    let gated = middleware::from_fn_with_state(gate, gate_middleware).layer(routes(state));

    Router::new().fallback_service(gated)
}

/// [`app`] with per-request tracing in front when `enabled`.
pub fn traced_app(state: AppState, gate: Arc<Gate>, enabled: bool) -> Router {
    let router = app(state, gate);
    if enabled {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn routes(state: AppState) -> Router {
    Router::new()
        .merge(system_routes())
        .merge(event_routes())
        .merge(guide_routes())
        .fallback(pages::page)
        .with_state(state)
}

fn system_routes() -> Router<AppState> {
    Router::new()
        .route("/api/info", get(public::system::info))
        .route("/api/health", get(public::system::health))
}

fn event_routes() -> Router<AppState> {
    Router::new().route(
        "/api/events",
        get(public::events::list)
            .options(public::events::preflight)
            .post(protected::events::upsert),
    )
}

fn guide_routes() -> Router<AppState> {
    Router::new().route("/api/guide-cards", get(public::guide::list))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SessionKeys;
    use crate::events::model::empty_details;
    use crate::events::Event;
    use crate::routing::{LocaleResolver, RoutePolicy};
    use crate::testing::{FailingEventStore, MemoryEventStore};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use chrono::{Duration, Local, Utc};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    const SECRET: &str = "app-test-secret";

    fn gate() -> Arc<Gate> {
        Arc::new(Gate::new(
            RoutePolicy::global().clone(),
            LocaleResolver::new(vec!["en".into(), "es".into()], "en"),
            SessionKeys::new(SECRET, 1),
            "__session",
            "/log-in",
        ))
    }

    fn test_app(store: Arc<dyn EventStore>) -> Router {
        app(AppState::new(store), gate())
    }

    fn bearer(user_id: Uuid, role: &str) -> String {
        let token = SessionKeys::new(SECRET, 1).issue(user_id, "Organizer", role).unwrap();
        format!("Bearer {token}")
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn composed(offset_days: i64, hour: u32) -> String {
        let day = (Local::now() + Duration::days(offset_days)).date_naive();
        format!("{}T{:02}:00", day.format("%Y-%m-%d"), hour)
    }

    fn stored_event(id: i64, organizer: Uuid, published: bool, start: &str) -> Event {
        let starts_at = crate::events::time::parse_composed(start).unwrap();
        Event {
            id,
            title: format!("Event {id}"),
            location: "hub".into(),
            starts_at,
            ends_at: starts_at + Duration::hours(1),
            all_day: false,
            description: None,
            details_json: empty_details(),
            published,
            organizer_id: Some(organizer),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn lists_only_published_events_in_start_order() {
        let organizer = Uuid::new_v4();
        let store = MemoryEventStore::with_events(vec![
            stored_event(1, organizer, true, "2031-05-02T10:00"),
            stored_event(2, organizer, false, "2031-05-01T10:00"),
            stored_event(3, organizer, true, "2031-05-01T09:00"),
        ]);

        let response = test_app(Arc::new(store))
            .oneshot(Request::get("/api/events").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS], "GET");

        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["count"], 2);
        assert_eq!(body["events"][0]["id"], 3);
        assert_eq!(body["events"][1]["id"], 1);
        assert_eq!(body["events"][0]["startsAt"], "2031-05-01T09:00:00");
    }

    #[tokio::test]
    async fn store_failure_returns_error_envelope() {
        let response = test_app(Arc::new(FailingEventStore))
            .oneshot(Request::get("/api/events").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["events"], json!([]));
        assert!(body["error"].as_str().unwrap().contains("DATABASE_URL"));
    }

    #[tokio::test]
    async fn preflight_is_no_content() {
        let response = test_app(Arc::new(MemoryEventStore::default()))
            .oneshot(Request::options("/api/events").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS], "GET, OPTIONS");
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
    }

    #[tokio::test]
    async fn creating_requires_a_session() {
        let payload = json!({
            "title": "Open Mic",
            "location": "hub",
            "startsAt": composed(3, 19),
            "endsAt": composed(3, 21),
        });
        let response = test_app(Arc::new(MemoryEventStore::default()))
            .oneshot(
                Request::post("/api/events")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn creates_event_owned_by_caller() {
        let store = Arc::new(MemoryEventStore::default());
        let user_id = Uuid::new_v4();
        let payload = json!({
            "title": "Open Mic",
            "location": "hub",
            "startsAt": composed(3, 19),
            "endsAt": composed(3, 21),
            "description": "Bring a song",
        });

        let response = test_app(store.clone())
            .oneshot(
                Request::post("/api/events")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::AUTHORIZATION, bearer(user_id, "student"))
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["data"]["title"], "Open Mic");
        assert_eq!(body["data"]["published"], true);

        let saved = store.snapshot().await;
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].organizer_id, Some(user_id));
    }

    #[tokio::test]
    async fn first_event_from_a_new_session_user_lists_its_organizer() {
        let store = Arc::new(MemoryEventStore::default());
        let payload = json!({
            "title": "Club Fair",
            "location": "hub",
            "startsAt": composed(5, 11),
            "endsAt": composed(5, 15),
        });

        let created = test_app(store.clone())
            .oneshot(
                Request::post("/api/events")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::AUTHORIZATION, bearer(Uuid::new_v4(), "staff"))
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);

        let listed = test_app(store)
            .oneshot(Request::get("/api/events").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(listed).await;
        assert_eq!(body["count"], 1);
        assert_eq!(body["events"][0]["organizer"], json!({ "name": "Organizer", "role": "staff" }));
    }

    #[tokio::test]
    async fn rejects_new_event_in_the_past() {
        let payload = json!({
            "title": "Yesterday",
            "location": "hub",
            "startsAt": composed(-1, 10),
            "endsAt": composed(-1, 11),
        });
        let response = test_app(Arc::new(MemoryEventStore::default()))
            .oneshot(
                Request::post("/api/events")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::AUTHORIZATION, bearer(Uuid::new_v4(), "student"))
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["field_errors"]["startsAt"], "start-in-past");
    }

    #[tokio::test]
    async fn organizer_can_edit_past_event() {
        let organizer = Uuid::new_v4();
        let store = Arc::new(MemoryEventStore::with_events(vec![stored_event(
            9,
            organizer,
            true,
            "2020-04-01T19:00",
        )]));
        let payload = json!({
            "id": 9,
            "title": "Spring Formal (photos)",
            "location": "hub",
            "startsAt": "2020-04-01T19:00",
            "endsAt": "2020-04-01T23:00",
        });

        let response = test_app(store.clone())
            .oneshot(
                Request::post("/api/events")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::AUTHORIZATION, bearer(organizer, "student"))
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(store.snapshot().await[0].title, "Spring Formal (photos)");
    }

    #[tokio::test]
    async fn only_organizer_may_edit() {
        let store = Arc::new(MemoryEventStore::with_events(vec![stored_event(
            9,
            Uuid::new_v4(),
            true,
            "2031-04-01T19:00",
        )]));
        let payload = json!({
            "id": 9,
            "title": "Hijacked",
            "location": "hub",
            "startsAt": "2031-04-01T19:00",
            "endsAt": "2031-04-01T23:00",
        });

        let response = test_app(store)
            .oneshot(
                Request::post("/api/events")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::AUTHORIZATION, bearer(Uuid::new_v4(), "student"))
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn editing_unknown_event_is_not_found() {
        let payload = json!({
            "id": 404,
            "title": "Ghost",
            "location": "hub",
            "startsAt": "2031-04-01T19:00",
            "endsAt": "2031-04-01T23:00",
        });

        let response = test_app(Arc::new(MemoryEventStore::default()))
            .oneshot(
                Request::post("/api/events")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::AUTHORIZATION, bearer(Uuid::new_v4(), "admin"))
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn guide_cards_are_served() {
        let response = test_app(Arc::new(MemoryEventStore::default()))
            .oneshot(Request::get("/api/guide-cards").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"].as_array().unwrap().len(), crate::guide::GUIDE_CARDS.len());
        assert_eq!(body["data"][5]["href"], "/map?id=hub");
    }

    #[tokio::test]
    async fn unprefixed_page_is_served_under_resolved_locale() {
        let response = test_app(Arc::new(MemoryEventStore::default()))
            .oneshot(
                Request::get("/")
                    .header(header::ACCEPT_LANGUAGE, "es-ES,es;q=0.9")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"]["locale"], "es");
        assert_eq!(body["data"]["path"], "/es");
    }

    #[tokio::test]
    async fn protected_page_redirects_anonymous_visitors() {
        let response = test_app(Arc::new(MemoryEventStore::default()))
            .oneshot(Request::get("/en/dashboard").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers()[header::LOCATION],
            "/en/log-in?redirect_url=%2Fen%2Fdashboard"
        );
    }

    #[tokio::test]
    async fn unknown_api_route_is_not_found() {
        let response = test_app(Arc::new(MemoryEventStore::default()))
            .oneshot(Request::get("/api/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn tracing_layer_keeps_routing_intact() {
        let app = traced_app(AppState::new(Arc::new(MemoryEventStore::default())), gate(), true);
        let response = app
            .oneshot(Request::get("/api/info").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"]["name"], "Campus Guide API");
    }
}
