// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity aggregation service.
//!
//! Assembles a user's activities with their intervals:
//! 1. List the user's activities from the activity store
//! 2. Fetch each activity's intervals (bounded fan-out, store order kept)
//! 3. Attach the average pace of each activity
//!
//! Any store failure aborts the whole call; no partial list is returned.

use crate::db::{ActivityStore, IntervalStore};
use crate::error::StoreError;
use crate::models::{to_presentation, Activity, PresentationActivity};
use futures_util::{stream, StreamExt, TryStreamExt};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// An activity with its intervals resolved and its pace derived.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedActivity {
    /// The activity, with `intervals` filled in store order
    pub activity: Activity,
    pub avg_pace_per_unit: f64,
    pub avg_pace_formatted: String,
}

/// Builds the combined activity/interval view for a user.
#[derive(Clone)]
pub struct ActivityAggregator {
    activities: Arc<dyn ActivityStore>,
    intervals: Arc<dyn IntervalStore>,
    pace_unit: f64,
    max_concurrent: usize,
    store_timeout: Duration,
}

impl ActivityAggregator {
    pub fn new(
        activities: Arc<dyn ActivityStore>,
        intervals: Arc<dyn IntervalStore>,
        pace_unit: f64,
        max_concurrent: usize,
        store_timeout: Duration,
    ) -> Self {
        Self {
            activities,
            intervals,
            pace_unit,
            max_concurrent: max_concurrent.max(1),
            store_timeout,
        }
    }

    /// Distance basis used for every pace this aggregator computes.
    pub fn pace_unit(&self) -> f64 {
        self.pace_unit
    }

    /// All of the user's activities, each with its intervals and pace.
    ///
    /// An empty list means the user has no activities; it is not an error.
    pub async fn enrich_activities_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<EnrichedActivity>, StoreError> {
        let activities = self
            .bounded("list activities by user", self.activities.list_by_user(user_id))
            .await?;

        tracing::debug!(
            user_id = %user_id,
            count = activities.len(),
            "Fetched activities for aggregation"
        );

        // `buffered` yields in input order; the first error ends the stream
        // and drops the fetches still in flight.
        stream::iter(activities)
            .map(|activity| self.enrich(activity))
            .buffered(self.max_concurrent)
            .try_collect()
            .await
    }

    /// Same as [`Self::enrich_activities_for_user`], mapped to the API shape.
    pub async fn get_activities_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PresentationActivity>, StoreError> {
        let enriched = self.enrich_activities_for_user(user_id).await?;
        Ok(enriched
            .iter()
            .map(|e| to_presentation(&e.activity, &e.activity.intervals, self.pace_unit))
            .collect())
    }

    /// A single activity with its intervals, or `None` if it does not exist.
    pub async fn get_activity(
        &self,
        activity_id: Uuid,
    ) -> Result<Option<EnrichedActivity>, StoreError> {
        let activity = self
            .bounded("get activity", self.activities.get_activity(activity_id))
            .await?;
        match activity {
            Some(activity) => Ok(Some(self.enrich(activity).await?)),
            None => Ok(None),
        }
    }

    async fn enrich(&self, mut activity: Activity) -> Result<EnrichedActivity, StoreError> {
        let activity_id = activity.id;
        let intervals = self
            .bounded(
                "list intervals by activity",
                self.intervals.list_by_activity(activity_id),
            )
            .await
            .map_err(|e| {
                tracing::warn!(activity_id = %activity_id, error = %e, "Interval fetch failed");
                StoreError::IntervalFetch {
                    activity_id,
                    source: Box::new(e),
                }
            })?;

        activity.intervals = intervals;
        let avg_pace_per_unit = activity.avg_pace_per_unit(self.pace_unit);
        Ok(EnrichedActivity {
            avg_pace_formatted: crate::models::pace::format_pace(avg_pace_per_unit),
            avg_pace_per_unit,
            activity,
        })
    }

    /// Run a store call under the configured timeout.
    async fn bounded<T>(
        &self,
        operation: &str,
        call: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        tokio::time::timeout(self.store_timeout, call)
            .await
            .map_err(|_| StoreError::Timeout {
                operation: operation.to_string(),
            })?
    }
}
