// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper implementing the store interfaces.
//!
//! Collections:
//! - `users` (keyed by user ID)
//! - `activities` (keyed by activity ID, `user_id` field for ownership)
//! - `intervals` (keyed by interval ID, `activity_id` field for ownership)

use crate::db::{collections, ActivityStore, IntervalStore, UserStore};
use crate::error::StoreError;
use crate::models::{Activity, Interval, User};
use async_trait::async_trait;
use uuid::Uuid;

// Firestore limits transactions to 500 writes.
const BATCH_SIZE: usize = 400;

fn db_err(e: impl std::fmt::Display) -> StoreError {
    StoreError::Backend(e.to_string())
}

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, StoreError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| db_err(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, StoreError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| db_err(format!("Failed to connect to Firestore Emulator: {}", e)))?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create an offline Firestore client for testing.
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, StoreError> {
        self.client
            .as_ref()
            .ok_or_else(|| db_err("Database not connected (offline mode)"))
    }

    /// Helper to batch delete documents using transactions.
    async fn batch_delete<T, F>(
        &self,
        items: &[T],
        collection: &str,
        id_extractor: F,
    ) -> Result<(), StoreError>
    where
        F: Fn(&T) -> String,
    {
        let client = self.get_client()?;

        for chunk in items.chunks(BATCH_SIZE) {
            let mut transaction = client
                .begin_transaction()
                .await
                .map_err(|e| db_err(format!("Failed to begin transaction: {}", e)))?;

            for item in chunk {
                let doc_id = id_extractor(item);
                client
                    .fluent()
                    .delete()
                    .from(collection)
                    .document_id(&doc_id)
                    .add_to_transaction(&mut transaction)
                    .map_err(|e| {
                        db_err(format!(
                            "Failed to add deletion to transaction for {}: {}",
                            collection, e
                        ))
                    })?;
            }

            transaction
                .commit()
                .await
                .map_err(|e| db_err(format!("Failed to commit batch deletion: {}", e)))?;
        }

        Ok(())
    }

    /// Delete the intervals of one activity. Returns how many were removed.
    async fn delete_intervals_of(&self, activity_id: Uuid) -> Result<usize, StoreError> {
        let intervals = self.list_by_activity(activity_id).await?;
        self.batch_delete(&intervals, collections::INTERVALS, |i: &Interval| {
            i.id.to_string()
        })
        .await?;
        Ok(intervals.len())
    }

    async fn delete_document(&self, collection: &str, id: Uuid) -> Result<(), StoreError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collection)
            .document_id(id.to_string())
            .execute()
            .await
            .map_err(db_err)?;
        Ok(())
    }
}

// ─── User Operations ─────────────────────────────────────────

#[async_trait]
impl UserStore for FirestoreDb {
    async fn create_user(&self, user: &User) -> Result<(), StoreError> {
        if self.get_user_by_email(&user.email).await?.is_some() {
            return Err(db_err(format!("duplicate email: {}", user.email)));
        }

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(user.id.to_string())
            .object(user)
            .execute()
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .order_by([("id", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(db_err)
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(&id.to_string())
            .await
            .map_err(db_err)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users: Vec<User> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(|q| q.field("email").eq(email))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(db_err)?;
        Ok(users.into_iter().next())
    }

    async fn update_user(&self, user: &User) -> Result<bool, StoreError> {
        if self.get_user(user.id).await?.is_none() {
            return Ok(false);
        }

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(user.id.to_string())
            .object(user)
            .execute()
            .await
            .map_err(db_err)?;
        Ok(true)
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, StoreError> {
        if self.get_user(id).await?.is_none() {
            return Ok(false);
        }

        let activities = self.list_by_user(id).await?;
        let mut interval_count = 0;
        for activity in &activities {
            interval_count += self.delete_intervals_of(activity.id).await?;
        }
        self.batch_delete(&activities, collections::ACTIVITIES, |a: &Activity| {
            a.id.to_string()
        })
        .await?;
        self.delete_document(collections::USERS, id).await?;

        tracing::info!(
            user_id = %id,
            activities = activities.len(),
            intervals = interval_count,
            "User data deletion complete"
        );
        Ok(true)
    }
}

// ─── Activity Operations ─────────────────────────────────────

#[async_trait]
impl ActivityStore for FirestoreDb {
    async fn create_activity(&self, activity: &Activity) -> Result<(), StoreError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::ACTIVITIES)
            .document_id(activity.id.to_string())
            .object(activity)
            .execute()
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn list_activities(&self) -> Result<Vec<Activity>, StoreError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::ACTIVITIES)
            .order_by([("start", firestore::FirestoreQueryDirection::Descending)])
            .obj()
            .query()
            .await
            .map_err(db_err)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Activity>, StoreError> {
        let user_key = user_id.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::ACTIVITIES)
            .filter(|q| q.field("user_id").eq(user_key.as_str()))
            // Most recent session first
            .order_by([("start", firestore::FirestoreQueryDirection::Descending)])
            .obj()
            .query()
            .await
            .map_err(db_err)
    }

    async fn get_activity(&self, id: Uuid) -> Result<Option<Activity>, StoreError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::ACTIVITIES)
            .obj()
            .one(&id.to_string())
            .await
            .map_err(db_err)
    }

    async fn update_activity(&self, activity: &Activity) -> Result<bool, StoreError> {
        if self.get_activity(activity.id).await?.is_none() {
            return Ok(false);
        }

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::ACTIVITIES)
            .document_id(activity.id.to_string())
            .object(activity)
            .execute()
            .await
            .map_err(db_err)?;
        Ok(true)
    }

    async fn delete_activity(&self, id: Uuid) -> Result<bool, StoreError> {
        if self.get_activity(id).await?.is_none() {
            return Ok(false);
        }

        let count = self.delete_intervals_of(id).await?;
        self.delete_document(collections::ACTIVITIES, id).await?;

        tracing::debug!(activity_id = %id, intervals = count, "Deleted activity");
        Ok(true)
    }
}

// ─── Interval Operations ─────────────────────────────────────

#[async_trait]
impl IntervalStore for FirestoreDb {
    async fn create_interval(&self, interval: &Interval) -> Result<(), StoreError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::INTERVALS)
            .document_id(interval.id.to_string())
            .object(interval)
            .execute()
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn list_by_activity(&self, activity_id: Uuid) -> Result<Vec<Interval>, StoreError> {
        let activity_key = activity_id.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::INTERVALS)
            .filter(|q| q.field("activity_id").eq(activity_key.as_str()))
            // IDs are UUIDv7, so this is creation order
            .order_by([("id", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(db_err)
    }
}
