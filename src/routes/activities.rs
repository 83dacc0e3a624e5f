// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity routes, including the per-user aggregated listing.

use crate::error::{AppError, Result};
use crate::models::{
    to_presentation, Activity, Duration, Feeling, LocationType, PresentationActivity,
};
use crate::routes::{non_negative, parse_body, parse_id};
use crate::time_utils::parse_rfc3339_utc;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use uuid::Uuid;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/activities", get(list_activities).post(create_activity))
        .route(
            "/activities/{id}",
            get(get_activity).put(update_activity).delete(delete_activity),
        )
        .route("/users/{id}/activities", get(get_activities_by_user))
}

/// Body for creating or replacing an activity.
#[derive(Deserialize, Validate)]
pub struct ActivityRequest {
    pub user_id: Uuid,
    #[serde(default)]
    #[validate(length(max = 32))]
    pub date: String,
    /// RFC3339; defaults to the time of the request
    #[serde(default)]
    pub start: Option<String>,
    pub duration: String,
    pub distance: f64,
    #[serde(default)]
    pub laps: u32,
    #[serde(default)]
    pub pool_size: f64,
    pub location_type: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub location_name: String,
    #[serde(default)]
    pub feeling: Option<String>,
    #[serde(default)]
    pub heart_rate_avg: Option<u32>,
    #[serde(default)]
    pub heart_rate_max: Option<u32>,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub notes: String,
}

impl ActivityRequest {
    /// Validate enum tags, duration text and measurements.
    fn into_activity(self, id: Uuid) -> Result<Activity> {
        let start = match self.start.as_deref() {
            Some(raw) => parse_rfc3339_utc(raw).ok_or_else(|| {
                AppError::BadRequest("Invalid 'start': must be RFC3339 datetime".to_string())
            })?,
            None => chrono::Utc::now(),
        };

        Ok(Activity {
            id,
            user_id: self.user_id,
            date: self.date,
            start,
            duration: Duration::parse(&self.duration)?,
            distance: non_negative("distance", self.distance)?,
            laps: self.laps,
            pool_size: non_negative("pool_size", self.pool_size)?,
            location_type: self.location_type.parse::<LocationType>()?,
            location_name: self.location_name,
            feeling: self
                .feeling
                .as_deref()
                .map(str::parse::<Feeling>)
                .transpose()?,
            heart_rate_avg: self.heart_rate_avg,
            heart_rate_max: self.heart_rate_max,
            notes: self.notes,
            intervals: vec![],
        })
    }
}

/// Aggregated activities of one user.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivitiesResponse {
    pub activities: Vec<PresentationActivity>,
}

async fn ensure_user_exists(state: &AppState, user_id: Uuid) -> Result<()> {
    if state.users.get_user(user_id).await?.is_none() {
        return Err(AppError::NotFound(format!("User {} not found", user_id)));
    }
    Ok(())
}

async fn create_activity(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<ActivityRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PresentationActivity>)> {
    let activity = parse_body(payload)?.into_activity(Uuid::now_v7())?;
    ensure_user_exists(&state, activity.user_id).await?;

    state.activities.create_activity(&activity).await?;
    tracing::info!(
        activity_id = %activity.id,
        user_id = %activity.user_id,
        distance = activity.distance,
        "Activity created"
    );

    let pace_unit = state.aggregator.pace_unit();
    Ok((
        StatusCode::CREATED,
        Json(to_presentation(&activity, &[], pace_unit)),
    ))
}

/// All activities, without their intervals.
async fn list_activities(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PresentationActivity>>> {
    let pace_unit = state.aggregator.pace_unit();
    let activities = state.activities.list_activities().await?;
    Ok(Json(
        activities
            .iter()
            .map(|a| to_presentation(a, &[], pace_unit))
            .collect(),
    ))
}

async fn get_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PresentationActivity>> {
    let id = parse_id(&id, "activity")?;
    let enriched = state
        .aggregator
        .get_activity(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Activity {} not found", id)))?;

    Ok(Json(to_presentation(
        &enriched.activity,
        &enriched.activity.intervals,
        state.aggregator.pace_unit(),
    )))
}

async fn update_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<ActivityRequest>, JsonRejection>,
) -> Result<Json<PresentationActivity>> {
    let id = parse_id(&id, "activity")?;
    let activity = parse_body(payload)?.into_activity(id)?;
    ensure_user_exists(&state, activity.user_id).await?;

    if !state.activities.update_activity(&activity).await? {
        return Err(AppError::NotFound(format!("Activity {} not found", id)));
    }

    let pace_unit = state.aggregator.pace_unit();
    Ok(Json(to_presentation(&activity, &[], pace_unit)))
}

async fn delete_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_id(&id, "activity")?;
    if !state.activities.delete_activity(id).await? {
        return Err(AppError::NotFound(format!("Activity {} not found", id)));
    }
    tracing::info!(activity_id = %id, "Activity deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// A user's activities, each with its intervals and average pace.
async fn get_activities_by_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ActivitiesResponse>> {
    let user_id = parse_id(&id, "user")?;

    let activities = state.aggregator.get_activities_for_user(user_id).await?;
    tracing::debug!(user_id = %user_id, count = activities.len(), "Aggregated activities");

    if activities.is_empty() && state.config.empty_activities_not_found {
        return Err(AppError::NotFound(
            "No activities found for user".to_string(),
        ));
    }

    Ok(Json(ActivitiesResponse { activities }))
}
