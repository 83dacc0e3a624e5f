// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Swim-Tracker: record swim workouts and their intervals
//!
//! This crate provides the backend API for storing users, swim activities
//! and intervals, and for serving each user's activities with derived
//! average paces.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::{ActivityStore, IntervalStore, UserStore};
use services::ActivityAggregator;
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub users: Arc<dyn UserStore>,
    pub activities: Arc<dyn ActivityStore>,
    pub intervals: Arc<dyn IntervalStore>,
    pub aggregator: ActivityAggregator,
}

impl AppState {
    /// Build state where one backend serves all three collections.
    pub fn new<S>(config: Config, store: S) -> Self
    where
        S: UserStore + ActivityStore + IntervalStore + 'static,
    {
        let store = Arc::new(store);
        let activities: Arc<dyn ActivityStore> = store.clone();
        let intervals: Arc<dyn IntervalStore> = store.clone();
        let aggregator = ActivityAggregator::new(
            activities.clone(),
            intervals.clone(),
            config.pace_unit_meters,
            config.interval_fetch_concurrency,
            config.store_timeout,
        );

        Self {
            config,
            users: store,
            activities,
            intervals,
            aggregator,
        }
    }
}
