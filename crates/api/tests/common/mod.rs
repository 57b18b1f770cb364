#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::FixedOffset;
use http_body_util::BodyExt;
use planner_core::types::EntityId;
use planner_db::MemoryGateway;
use planner_notify::{LogNotifier, NotificationDispatcher, Notifier, NotifyError, Recipient};
use planner_workflow::TripWorkflow;
use tower::ServiceExt;

use planner_api::config::{LogFormat, ServerConfig};
use planner_api::router::build_app_router;
use planner_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        itinerary_utc_offset_minutes: 0,
        db_max_connections: 1,
        log_format: LogFormat::Pretty,
    }
}

/// A router over the in-memory gateway plus the dispatcher behind it, so
/// tests can wait for background notifications.
pub struct TestApp {
    pub router: Router,
    pub dispatcher: NotificationDispatcher,
}

impl TestApp {
    pub async fn settle(&self) {
        self.dispatcher.wait_idle().await;
    }
}

/// Build the full application router with all middleware layers over a
/// fresh in-memory gateway and the given notifier.
pub fn build_test_app_with(notifier: Arc<dyn Notifier>) -> TestApp {
    let config = test_config();
    let dispatcher = NotificationDispatcher::new(notifier);
    let state = AppState {
        workflow: TripWorkflow::new(
            Arc::new(MemoryGateway::new()),
            dispatcher.clone(),
            FixedOffset::east_opt(0).unwrap(),
        ),
        config: Arc::new(config.clone()),
        pool: None,
    };

    TestApp {
        router: build_app_router(state, &config),
        dispatcher,
    }
}

/// Same as [`build_test_app_with`] using the log-only notifier.
pub fn build_test_app() -> Router {
    build_test_app_with(Arc::new(LogNotifier)).router
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::PATCH, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as raw bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

/// Payload for a Paris trip owned by Olivia.
pub fn paris_trip(emails: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "destination": "Paris",
        "starts_at": "2024-06-01T00:00:00Z",
        "ends_at": "2024-06-10T00:00:00Z",
        "emails_to_invite": emails,
        "owner_name": "Olivia",
        "owner_email": "olivia@example.com",
    })
}

/// Create a trip through the API and return its id.
pub async fn create_trip(app: &Router, emails: &[&str]) -> String {
    let response = post_json(app.clone(), "/api/v1/trips", paris_trip(emails)).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["trip_id"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Notifier doubles
// ---------------------------------------------------------------------------

/// Fails every call, remembering which recipients it was asked to reach.
#[derive(Default)]
pub struct FailingNotifier {
    pub attempted: Mutex<Vec<String>>,
}

#[async_trait]
impl Notifier for FailingNotifier {
    async fn send_owner_confirmation(&self, _trip_id: EntityId) -> Result<(), NotifyError> {
        self.attempted.lock().unwrap().push("owner".to_string());
        Err(NotifyError::Build("smtp unreachable".to_string()))
    }

    async fn send_participant_confirmation(
        &self,
        recipient: &Recipient,
        _trip_id: EntityId,
    ) -> Result<(), NotifyError> {
        self.attempted.lock().unwrap().push(recipient.name.clone());
        Err(NotifyError::Build("smtp unreachable".to_string()))
    }

    async fn send_participants_confirmation(
        &self,
        recipients: &[Recipient],
        _trip_id: EntityId,
    ) -> Result<(), NotifyError> {
        let mut attempted = self.attempted.lock().unwrap();
        attempted.extend(recipients.iter().map(|r| r.name.clone()));
        Err(NotifyError::Partial {
            failed: recipients.len(),
            total: recipients.len(),
        })
    }
}
