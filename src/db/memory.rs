//! In-memory store used by tests and local runs without Firestore.
//!
//! Each `MemoryDb` owns its own data; clones share it.

use crate::db::{ActivityStore, IntervalStore, UserStore};
use crate::error::StoreError;
use crate::models::{Activity, Interval, User};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    activities: Vec<Activity>,
    intervals: Vec<Interval>,
}

/// Insertion-ordered in-memory tables.
#[derive(Clone, Default)]
pub struct MemoryDb {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryDb {
    async fn create_user(&self, user: &User) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Backend(format!(
                "duplicate email: {}",
                user.email
            )));
        }
        tables.users.push(user.clone());
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.tables.read().await.users.clone())
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn update_user(&self, user: &User) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        match tables.users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        if tables.users.len() == before {
            return Ok(false);
        }

        let owned: Vec<Uuid> = tables
            .activities
            .iter()
            .filter(|a| a.user_id == id)
            .map(|a| a.id)
            .collect();
        tables.activities.retain(|a| a.user_id != id);
        tables
            .intervals
            .retain(|i| !owned.contains(&i.activity_id));
        Ok(true)
    }
}

#[async_trait]
impl ActivityStore for MemoryDb {
    async fn create_activity(&self, activity: &Activity) -> Result<(), StoreError> {
        let mut stored = activity.clone();
        stored.intervals.clear();
        self.tables.write().await.activities.push(stored);
        Ok(())
    }

    async fn list_activities(&self) -> Result<Vec<Activity>, StoreError> {
        Ok(self.tables.read().await.activities.clone())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Activity>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .activities
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get_activity(&self, id: Uuid) -> Result<Option<Activity>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.activities.iter().find(|a| a.id == id).cloned())
    }

    async fn update_activity(&self, activity: &Activity) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        match tables.activities.iter_mut().find(|a| a.id == activity.id) {
            Some(existing) => {
                *existing = activity.clone();
                existing.intervals.clear();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_activity(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.activities.len();
        tables.activities.retain(|a| a.id != id);
        if tables.activities.len() == before {
            return Ok(false);
        }
        tables.intervals.retain(|i| i.activity_id != id);
        Ok(true)
    }
}

#[async_trait]
impl IntervalStore for MemoryDb {
    async fn create_interval(&self, interval: &Interval) -> Result<(), StoreError> {
        self.tables.write().await.intervals.push(interval.clone());
        Ok(())
    }

    async fn list_by_activity(&self, activity_id: Uuid) -> Result<Vec<Interval>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .intervals
            .iter()
            .filter(|i| i.activity_id == activity_id)
            .cloned()
            .collect())
    }
}
