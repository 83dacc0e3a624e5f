// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Externally shaped activity and interval views.
//!
//! Every stored attribute has a destination field here; the only additions
//! are the derived pace strings.

use crate::models::{Activity, Interval};
use crate::time_utils::format_utc_rfc3339;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use uuid::Uuid;

/// Interval as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PresentationInterval {
    pub id: Uuid,
    pub activity_id: Uuid,
    pub start_time: Option<String>,
    pub duration: String,
    pub distance: f64,
    #[serde(rename = "type")]
    pub interval_type: String,
    pub stroke: String,
    pub notes: String,
    pub pace_formatted: String,
}

/// Activity with its intervals and formatted pace, as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PresentationActivity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: String,
    pub start: String,
    pub duration: String,
    pub distance: f64,
    pub laps: u32,
    pub pool_size: f64,
    pub location_type: String,
    pub location_name: String,
    pub feeling: Option<String>,
    pub heart_rate_avg: Option<u32>,
    pub heart_rate_max: Option<u32>,
    pub notes: String,
    /// Average pace as `mm:ss` per `pace_unit_meters`, or "N/A"
    pub avg_pace_formatted: String,
    pub pace_unit_meters: f64,
    pub intervals: Vec<PresentationInterval>,
}

/// Map a stored interval to its API shape.
pub fn interval_to_presentation(interval: &Interval, pace_unit: f64) -> PresentationInterval {
    PresentationInterval {
        id: interval.id,
        activity_id: interval.activity_id,
        start_time: interval.start_time.map(format_utc_rfc3339),
        duration: interval.duration.to_string(),
        distance: interval.distance,
        interval_type: interval.interval_type.to_string(),
        stroke: interval.stroke.to_string(),
        notes: interval.notes.clone(),
        pace_formatted: interval.pace_formatted(pace_unit),
    }
}

/// Map an activity and its intervals to the API shape.
///
/// `intervals` are emitted in the order given; `activity.intervals` is ignored.
pub fn to_presentation(
    activity: &Activity,
    intervals: &[Interval],
    pace_unit: f64,
) -> PresentationActivity {
    PresentationActivity {
        id: activity.id,
        user_id: activity.user_id,
        date: activity.date.clone(),
        start: format_utc_rfc3339(activity.start),
        duration: activity.duration.to_string(),
        distance: activity.distance,
        laps: activity.laps,
        pool_size: activity.pool_size,
        location_type: activity.location_type.to_string(),
        location_name: activity.location_name.clone(),
        feeling: activity.feeling.map(|f| f.to_string()),
        heart_rate_avg: activity.heart_rate_avg,
        heart_rate_max: activity.heart_rate_max,
        notes: activity.notes.clone(),
        avg_pace_formatted: activity.avg_pace_formatted(pace_unit),
        pace_unit_meters: pace_unit,
        intervals: intervals
            .iter()
            .map(|i| interval_to_presentation(i, pace_unit))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pace::DEFAULT_PACE_UNIT_METERS;
    use crate::models::{Duration, Feeling, IntervalType, LocationType, StrokeType};
    use chrono::TimeZone;

    fn sample_activity() -> Activity {
        Activity {
            id: Uuid::now_v7(),
            user_id: Uuid::now_v7(),
            date: "2023-10-01".to_string(),
            start: chrono::Utc.with_ymd_and_hms(2023, 10, 1, 7, 30, 0).unwrap(),
            duration: Duration::parse("25m0s").unwrap(),
            distance: 1000.0,
            laps: 40,
            pool_size: 25.0,
            location_type: LocationType::Pool,
            location_name: "CEPE".to_string(),
            feeling: Some(Feeling::Tired),
            heart_rate_avg: Some(120),
            heart_rate_max: Some(140),
            notes: "Morning swim".to_string(),
            intervals: vec![],
        }
    }

    fn sample_interval(activity_id: Uuid, kind: IntervalType, notes: &str) -> Interval {
        Interval {
            id: Uuid::now_v7(),
            activity_id,
            start_time: None,
            duration: Duration::parse("2m5s").unwrap(),
            distance: 100.0,
            interval_type: kind,
            stroke: StrokeType::Butterfly,
            notes: notes.to_string(),
        }
    }

    #[test]
    fn test_copies_every_activity_field() {
        let activity = sample_activity();
        let view = to_presentation(&activity, &[], DEFAULT_PACE_UNIT_METERS);

        assert_eq!(view.id, activity.id);
        assert_eq!(view.user_id, activity.user_id);
        assert_eq!(view.date, "2023-10-01");
        assert_eq!(view.start, "2023-10-01T07:30:00Z");
        assert_eq!(view.duration, "25m0s");
        assert_eq!(view.distance, 1000.0);
        assert_eq!(view.laps, 40);
        assert_eq!(view.pool_size, 25.0);
        assert_eq!(view.location_type, "pool");
        assert_eq!(view.location_name, "CEPE");
        assert_eq!(view.feeling.as_deref(), Some("tired"));
        assert_eq!(view.heart_rate_avg, Some(120));
        assert_eq!(view.heart_rate_max, Some(140));
        assert_eq!(view.notes, "Morning swim");
        assert_eq!(view.avg_pace_formatted, "02:30");
        assert!(view.intervals.is_empty());
    }

    #[test]
    fn test_interval_order_and_fields() {
        let activity = sample_activity();
        let intervals = vec![
            sample_interval(activity.id, IntervalType::Warmup, "first"),
            sample_interval(activity.id, IntervalType::Rest, "second"),
            sample_interval(activity.id, IntervalType::MainSet, "third"),
        ];

        let view = to_presentation(&activity, &intervals, DEFAULT_PACE_UNIT_METERS);

        let notes: Vec<&str> = view.intervals.iter().map(|i| i.notes.as_str()).collect();
        assert_eq!(notes, vec!["first", "second", "third"]);

        let rest = &view.intervals[1];
        assert_eq!(rest.interval_type, "rest");
        assert_eq!(rest.pace_formatted, "N/A");

        let main = &view.intervals[2];
        assert_eq!(main.id, intervals[2].id);
        assert_eq!(main.activity_id, activity.id);
        assert_eq!(main.interval_type, "main_set");
        assert_eq!(main.stroke, "butterfly");
        assert_eq!(main.duration, "2m5s");
        assert_eq!(main.distance, 100.0);
        assert_eq!(main.pace_formatted, "02:05");
    }

    #[test]
    fn test_wire_field_names() {
        let activity = sample_activity();
        let intervals = vec![sample_interval(activity.id, IntervalType::Swim, "")];
        let json = serde_json::to_value(to_presentation(
            &activity,
            &intervals,
            DEFAULT_PACE_UNIT_METERS,
        ))
        .unwrap();

        assert_eq!(json["avg_pace_formatted"], "02:30");
        assert_eq!(json["intervals"][0]["type"], "swim");
        assert_eq!(json["intervals"][0]["start_time"], serde_json::Value::Null);
    }
}
