// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Interval routes.

use crate::error::{AppError, Result};
use crate::models::presentation::interval_to_presentation;
use crate::models::{Duration, Interval, IntervalType, PresentationInterval, StrokeType};
use crate::routes::{non_negative, parse_body, parse_id};
use crate::time_utils::parse_rfc3339_utc;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/intervals", post(create_interval))
        .route("/activities/{id}/intervals", get(list_intervals))
}

/// Body for creating an interval.
#[derive(Deserialize, Validate)]
pub struct IntervalRequest {
    pub activity_id: Uuid,
    #[serde(default)]
    pub start_time: Option<String>,
    pub duration: String,
    pub distance: f64,
    #[serde(rename = "type")]
    pub interval_type: String,
    /// Defaults to "unknown"
    #[serde(default)]
    pub stroke: Option<String>,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub notes: String,
}

impl IntervalRequest {
    fn into_interval(self, id: Uuid) -> Result<Interval> {
        let start_time = self
            .start_time
            .as_deref()
            .map(|raw| {
                parse_rfc3339_utc(raw).ok_or_else(|| {
                    AppError::BadRequest(
                        "Invalid 'start_time': must be RFC3339 datetime".to_string(),
                    )
                })
            })
            .transpose()?;

        Ok(Interval {
            id,
            activity_id: self.activity_id,
            start_time,
            duration: Duration::parse(&self.duration)?,
            distance: non_negative("distance", self.distance)?,
            interval_type: self.interval_type.parse::<IntervalType>()?,
            stroke: match self.stroke.as_deref() {
                Some(raw) => raw.parse::<StrokeType>()?,
                None => StrokeType::default(),
            },
            notes: self.notes,
        })
    }
}

async fn create_interval(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<IntervalRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PresentationInterval>)> {
    let interval = parse_body(payload)?.into_interval(Uuid::now_v7())?;

    if state
        .activities
        .get_activity(interval.activity_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound(format!(
            "Activity {} not found",
            interval.activity_id
        )));
    }

    state.intervals.create_interval(&interval).await?;
    tracing::info!(
        interval_id = %interval.id,
        activity_id = %interval.activity_id,
        interval_type = %interval.interval_type,
        "Interval created"
    );

    let pace_unit = state.aggregator.pace_unit();
    Ok((
        StatusCode::CREATED,
        Json(interval_to_presentation(&interval, pace_unit)),
    ))
}

async fn list_intervals(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<PresentationInterval>>> {
    let activity_id = parse_id(&id, "activity")?;
    let pace_unit = state.aggregator.pace_unit();
    let intervals = state.intervals.list_by_activity(activity_id).await?;
    Ok(Json(
        intervals
            .iter()
            .map(|i| interval_to_presentation(i, pace_unit))
            .collect(),
    ))
}
