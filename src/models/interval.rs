// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! A single segment of a swim session.

use crate::error::ValidationError;
use crate::models::pace::{average_pace_per_unit, format_pace};
use crate::models::Duration;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Kind of interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalType {
    Swim,
    /// Break between sets; never has a pace
    Rest,
    Drill,
    Kick,
    Pull,
    Warmup,
    MainSet,
    Cooldown,
}

impl IntervalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntervalType::Swim => "swim",
            IntervalType::Rest => "rest",
            IntervalType::Drill => "drill",
            IntervalType::Kick => "kick",
            IntervalType::Pull => "pull",
            IntervalType::Warmup => "warmup",
            IntervalType::MainSet => "main_set",
            IntervalType::Cooldown => "cooldown",
        }
    }
}

impl FromStr for IntervalType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "swim" => Ok(IntervalType::Swim),
            "rest" => Ok(IntervalType::Rest),
            "drill" => Ok(IntervalType::Drill),
            "kick" => Ok(IntervalType::Kick),
            "pull" => Ok(IntervalType::Pull),
            "warmup" => Ok(IntervalType::Warmup),
            "main_set" => Ok(IntervalType::MainSet),
            "cooldown" => Ok(IntervalType::Cooldown),
            other => Err(ValidationError::UnknownVariant {
                field: "interval type",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for IntervalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Swimming stroke used in an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeType {
    Freestyle,
    Backstroke,
    Breaststroke,
    Butterfly,
    /// Individual medley
    Medley,
    #[default]
    Unknown,
}

impl StrokeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrokeType::Freestyle => "freestyle",
            StrokeType::Backstroke => "backstroke",
            StrokeType::Breaststroke => "breaststroke",
            StrokeType::Butterfly => "butterfly",
            StrokeType::Medley => "medley",
            StrokeType::Unknown => "unknown",
        }
    }
}

impl FromStr for StrokeType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "freestyle" => Ok(StrokeType::Freestyle),
            "backstroke" => Ok(StrokeType::Backstroke),
            "breaststroke" => Ok(StrokeType::Breaststroke),
            "butterfly" => Ok(StrokeType::Butterfly),
            "medley" => Ok(StrokeType::Medley),
            "unknown" => Ok(StrokeType::Unknown),
            other => Err(ValidationError::UnknownVariant {
                field: "stroke",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for StrokeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored interval record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub id: Uuid,
    /// Owning activity
    pub activity_id: Uuid,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    pub duration: Duration,
    /// Distance in meters
    pub distance: f64,
    #[serde(rename = "type")]
    pub interval_type: IntervalType,
    pub stroke: StrokeType,
    /// Optional notes like "felt strong", "used fins"
    #[serde(default)]
    pub notes: String,
}

impl Interval {
    /// Seconds per `unit_size` meters. Rest intervals always report 0.
    pub fn pace_per_unit(&self, unit_size: f64) -> f64 {
        if self.interval_type == IntervalType::Rest {
            return 0.0;
        }
        average_pace_per_unit(&self.duration, self.distance, unit_size)
    }

    pub fn pace_formatted(&self, unit_size: f64) -> String {
        format_pace(self.pace_per_unit(unit_size))
    }
}
