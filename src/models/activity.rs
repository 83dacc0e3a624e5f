// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Swim activity (session) model for storage and API.

use crate::error::ValidationError;
use crate::models::pace::{average_pace_per_unit, format_pace};
use crate::models::{Duration, Interval};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Where the swim took place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    Pool,
    OpenWater,
}

impl LocationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::Pool => "pool",
            LocationType::OpenWater => "open_water",
        }
    }
}

impl FromStr for LocationType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pool" => Ok(LocationType::Pool),
            "open_water" => Ok(LocationType::OpenWater),
            other => Err(ValidationError::UnknownVariant {
                field: "location type",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the swimmer felt after the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feeling {
    Excellent,
    Good,
    Regular,
    Tired,
    Bad,
}

impl Feeling {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feeling::Excellent => "excellent",
            Feeling::Good => "good",
            Feeling::Regular => "regular",
            Feeling::Tired => "tired",
            Feeling::Bad => "bad",
        }
    }
}

impl FromStr for Feeling {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "excellent" => Ok(Feeling::Excellent),
            "good" => Ok(Feeling::Good),
            "regular" => Ok(Feeling::Regular),
            "tired" => Ok(Feeling::Tired),
            "bad" => Ok(Feeling::Bad),
            other => Err(ValidationError::UnknownVariant {
                field: "feeling",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Feeling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored activity record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Activity ID (also used as document ID)
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Calendar date as entered by the client (e.g. "2023-10-01")
    #[serde(default)]
    pub date: String,
    /// Start date/time
    pub start: DateTime<Utc>,
    pub duration: Duration,
    /// Total distance in meters
    pub distance: f64,
    /// Number of pool laps
    pub laps: u32,
    /// Pool length in meters (0 for open water)
    pub pool_size: f64,
    pub location_type: LocationType,
    #[serde(default)]
    pub location_name: String,
    #[serde(default)]
    pub feeling: Option<Feeling>,
    #[serde(default)]
    pub heart_rate_avg: Option<u32>,
    #[serde(default)]
    pub heart_rate_max: Option<u32>,
    #[serde(default)]
    pub notes: String,
    /// Segments of the session; only filled in by the aggregator, never stored
    #[serde(skip)]
    pub intervals: Vec<Interval>,
}

impl Activity {
    /// Average seconds per `unit_size` meters over the whole session.
    pub fn avg_pace_per_unit(&self, unit_size: f64) -> f64 {
        average_pace_per_unit(&self.duration, self.distance, unit_size)
    }

    pub fn avg_pace_formatted(&self, unit_size: f64) -> String {
        format_pace(self.avg_pace_per_unit(unit_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pace::DEFAULT_PACE_UNIT_METERS;

    fn make_activity(seconds: u64, distance: f64) -> Activity {
        Activity {
            id: Uuid::now_v7(),
            user_id: Uuid::now_v7(),
            date: "2023-10-01".to_string(),
            start: Utc::now(),
            duration: Duration::from_seconds(seconds),
            distance,
            laps: 40,
            pool_size: 25.0,
            location_type: LocationType::Pool,
            location_name: "CEPE".to_string(),
            feeling: Some(Feeling::Good),
            heart_rate_avg: None,
            heart_rate_max: None,
            notes: String::new(),
            intervals: vec![],
        }
    }

    #[test]
    fn test_avg_pace_per_100m() {
        let activity = make_activity(1500, 1000.0);
        assert_eq!(activity.avg_pace_per_unit(DEFAULT_PACE_UNIT_METERS), 150.0);
        assert_eq!(activity.avg_pace_formatted(DEFAULT_PACE_UNIT_METERS), "02:30");
    }

    #[test]
    fn test_avg_pace_edge_cases() {
        assert_eq!(
            make_activity(1500, 0.0).avg_pace_formatted(DEFAULT_PACE_UNIT_METERS),
            "N/A"
        );
        assert_eq!(
            make_activity(0, 1000.0).avg_pace_formatted(DEFAULT_PACE_UNIT_METERS),
            "N/A"
        );
    }

    #[test]
    fn test_intervals_are_not_serialized() {
        let mut activity = make_activity(60, 100.0);
        activity.intervals.push(Interval {
            id: Uuid::now_v7(),
            activity_id: activity.id,
            start_time: None,
            duration: Duration::from_seconds(60),
            distance: 100.0,
            interval_type: crate::models::IntervalType::Swim,
            stroke: crate::models::StrokeType::Freestyle,
            notes: String::new(),
        });

        let value = serde_json::to_value(&activity).unwrap();
        assert!(value.get("intervals").is_none());
        assert_eq!(value["location_type"], "pool");
        assert_eq!(value["feeling"], "good");
    }

    #[test]
    fn test_location_and_feeling_tags() {
        assert_eq!(
            "open_water".parse::<LocationType>().unwrap(),
            LocationType::OpenWater
        );
        assert!("lake".parse::<LocationType>().is_err());
        assert_eq!("tired".parse::<Feeling>().unwrap(), Feeling::Tired);
        assert!("meh".parse::<Feeling>().is_err());
    }
}
