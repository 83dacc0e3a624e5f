//! User model for storage and API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User profile. Email is unique across users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(ts_rs::TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct User {
    /// User ID (also used as document ID)
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub city: String,
    pub phone: String,
    /// Age in years
    #[serde(default)]
    pub age: Option<u32>,
    /// Height in centimeters
    #[serde(default)]
    pub height: Option<u32>,
    /// Weight in kilograms
    #[serde(default)]
    pub weight: Option<f64>,
}
