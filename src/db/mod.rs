//! Database layer: store interfaces and their adapters.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::error::StoreError;
use crate::models::{Activity, Interval, User};
use async_trait::async_trait;
use uuid::Uuid;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const ACTIVITIES: &str = "activities";
    pub const INTERVALS: &str = "intervals";
}

/// Persistence for users.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, user: &User) -> Result<(), StoreError>;

    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    async fn get_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Returns `false` if no user with that ID exists.
    async fn update_user(&self, user: &User) -> Result<bool, StoreError>;

    /// Deletes the user with all their activities and intervals.
    /// Returns `false` if no user with that ID exists.
    async fn delete_user(&self, id: Uuid) -> Result<bool, StoreError>;
}

/// Persistence for activities.
#[async_trait]
pub trait ActivityStore: Send + Sync {
    async fn create_activity(&self, activity: &Activity) -> Result<(), StoreError>;

    async fn list_activities(&self) -> Result<Vec<Activity>, StoreError>;

    /// All activities owned by `user_id`, in store order.
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Activity>, StoreError>;

    async fn get_activity(&self, id: Uuid) -> Result<Option<Activity>, StoreError>;

    /// Returns `false` if no activity with that ID exists.
    async fn update_activity(&self, activity: &Activity) -> Result<bool, StoreError>;

    /// Deletes the activity and its intervals.
    /// Returns `false` if no activity with that ID exists.
    async fn delete_activity(&self, id: Uuid) -> Result<bool, StoreError>;
}

/// Persistence for intervals.
#[async_trait]
pub trait IntervalStore: Send + Sync {
    async fn create_interval(&self, interval: &Interval) -> Result<(), StoreError>;

    /// All intervals of `activity_id`, in store order.
    async fn list_by_activity(&self, activity_id: Uuid) -> Result<Vec<Interval>, StoreError>;
}
