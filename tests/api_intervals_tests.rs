// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Interval endpoint tests.

use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::{body_json, create_activity, create_interval, create_user, send};

#[tokio::test]
async fn test_create_interval() {
    let (app, _state) = common::create_test_app();
    let user_id = create_user(&app, "ana@example.com").await;
    let activity_id = create_activity(&app, &user_id, "30m", 1500.0).await;

    let body = create_interval(&app, &activity_id, "main_set", "2m5s", 100.0).await;
    assert_eq!(body["activity_id"], activity_id.as_str());
    assert_eq!(body["type"], "main_set");
    assert_eq!(body["stroke"], "freestyle");
    assert_eq!(body["pace_formatted"], "02:05");
    assert_eq!(body["start_time"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_interval_for_missing_activity() {
    let (app, _state) = common::create_test_app();

    let response = send(
        &app,
        "POST",
        "/intervals",
        Some(json!({
            "activity_id": uuid::Uuid::now_v7(),
            "duration": "1m",
            "distance": 50.0,
            "type": "swim"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_interval_defaults_and_start_time() {
    let (app, _state) = common::create_test_app();
    let user_id = create_user(&app, "ana@example.com").await;
    let activity_id = create_activity(&app, &user_id, "30m", 1500.0).await;

    let response = send(
        &app,
        "POST",
        "/intervals",
        Some(json!({
            "activity_id": activity_id,
            "start_time": "2023-10-01T09:05:00+02:00",
            "duration": "90s",
            "distance": 100.0,
            "type": "kick"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["stroke"], "unknown");
    assert_eq!(body["start_time"], "2023-10-01T07:05:00Z");
    assert_eq!(body["pace_formatted"], "01:30");
}

#[tokio::test]
async fn test_invalid_interval_fields() {
    let (app, _state) = common::create_test_app();
    let user_id = create_user(&app, "ana@example.com").await;
    let activity_id = create_activity(&app, &user_id, "30m", 1500.0).await;

    for body in [
        json!({ "activity_id": activity_id, "duration": "2x", "distance": 100.0, "type": "swim" }),
        json!({ "activity_id": activity_id, "duration": "2m", "distance": 100.0, "type": "sprint" }),
        json!({ "activity_id": activity_id, "duration": "2m", "distance": -1.0, "type": "swim" }),
        json!({ "activity_id": activity_id, "duration": "2m", "distance": 100.0, "type": "swim", "stroke": "doggy" }),
        json!({ "activity_id": activity_id, "duration": "2m", "distance": 100.0, "type": "swim", "start_time": "soon" }),
    ] {
        let response = send(&app, "POST", "/intervals", Some(body.clone())).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);
    }
}

#[tokio::test]
async fn test_list_intervals_in_creation_order() {
    let (app, _state) = common::create_test_app();
    let user_id = create_user(&app, "ana@example.com").await;
    let activity_id = create_activity(&app, &user_id, "30m", 1500.0).await;

    for kind in ["warmup", "drill", "pull", "cooldown"] {
        create_interval(&app, &activity_id, kind, "3m", 150.0).await;
    }

    let response = send(
        &app,
        "GET",
        &format!("/activities/{}/intervals", activity_id),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let kinds: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["type"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, ["warmup", "drill", "pull", "cooldown"]);
}
