// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pace: seconds needed to cover a fixed distance unit.

use crate::models::Duration;

/// Distance basis used for swim pace (seconds per 100m).
pub const DEFAULT_PACE_UNIT_METERS: f64 = 100.0;

/// Display value when no pace can be computed.
pub const NO_PACE: &str = "N/A";

/// Seconds per `unit_size` meters. Zero distance yields 0.
pub fn average_pace_per_unit(duration: &Duration, distance: f64, unit_size: f64) -> f64 {
    if distance == 0.0 {
        return 0.0;
    }
    duration.to_seconds() / distance * unit_size
}

/// Format a pace as `mm:ss`, truncating to whole seconds. Zero is `"N/A"`.
pub fn format_pace(pace_seconds: f64) -> String {
    if pace_seconds == 0.0 {
        return NO_PACE.to_string();
    }
    let whole = pace_seconds.trunc() as u64;
    format!("{:02}:{:02}", whole / 60, whole % 60)
}
