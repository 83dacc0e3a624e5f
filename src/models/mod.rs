// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod duration;
pub mod interval;
pub mod pace;
pub mod presentation;
pub mod user;

pub use activity::{Activity, Feeling, LocationType};
pub use duration::Duration;
pub use interval::{Interval, IntervalType, StrokeType};
pub use presentation::{to_presentation, PresentationActivity, PresentationInterval};
pub use user::User;
