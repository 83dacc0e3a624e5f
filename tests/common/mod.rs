// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use serde_json::Value;
use std::sync::Arc;
use swim_tracker::config::Config;
use swim_tracker::db::{FirestoreDb, MemoryDb};
use swim_tracker::routes::create_router;
use swim_tracker::AppState;
use tower::ServiceExt;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a test app backed by a fresh in-memory store.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Config::test_default())
}

#[allow(dead_code)]
pub fn create_test_app_with(config: Config) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(config, MemoryDb::new()));
    (create_router(state.clone()), state)
}

/// Create a test app whose store is an offline Firestore client.
/// Every store call fails.
#[allow(dead_code)]
pub fn create_offline_app() -> axum::Router {
    let state = Arc::new(AppState::new(Config::test_default(), FirestoreDb::new_mock()));
    create_router(state)
}

/// Send one request with an optional JSON body.
#[allow(dead_code)]
pub async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[allow(dead_code)]
pub fn user_body(email: &str) -> Value {
    serde_json::json!({
        "name": "Ana Swimmer",
        "email": email,
        "city": "Montevideo",
        "phone": "+598 99 123 456",
        "age": 34,
        "height": 170,
        "weight": 62.5
    })
}

/// Create a user through the API and return its id.
#[allow(dead_code)]
pub async fn create_user(app: &axum::Router, email: &str) -> String {
    let response = send(app, "POST", "/users", Some(user_body(email))).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_str().unwrap().to_string()
}

#[allow(dead_code)]
pub fn activity_body(user_id: &str, duration: &str, distance: f64) -> Value {
    serde_json::json!({
        "user_id": user_id,
        "date": "2023-10-01",
        "start": "2023-10-01T07:00:00Z",
        "duration": duration,
        "distance": distance,
        "laps": 20,
        "pool_size": 50.0,
        "location_type": "pool",
        "location_name": "Club Neptuno",
        "feeling": "good",
        "notes": "Morning swim"
    })
}

/// Create an activity through the API and return its id.
#[allow(dead_code)]
pub async fn create_activity(
    app: &axum::Router,
    user_id: &str,
    duration: &str,
    distance: f64,
) -> String {
    let response = send(
        app,
        "POST",
        "/activities",
        Some(activity_body(user_id, duration, distance)),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_str().unwrap().to_string()
}

/// Create an interval through the API and return its JSON.
#[allow(dead_code)]
pub async fn create_interval(
    app: &axum::Router,
    activity_id: &str,
    kind: &str,
    duration: &str,
    distance: f64,
) -> Value {
    let response = send(
        app,
        "POST",
        "/intervals",
        Some(serde_json::json!({
            "activity_id": activity_id,
            "duration": duration,
            "distance": distance,
            "type": kind,
            "stroke": "freestyle"
        })),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}
