// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile routes.

use crate::error::{AppError, Result};
use crate::models::User;
use crate::routes::{non_negative, parse_body, parse_id};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::{Validate, ValidateEmail};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/users/email/{email}", get(get_user_by_email))
}

/// Body for creating or replacing a user.
#[derive(Deserialize, Validate)]
pub struct UserRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 200))]
    pub city: String,
    #[validate(length(min = 1, max = 50))]
    pub phone: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub weight: Option<f64>,
}

impl UserRequest {
    fn into_user(self, id: Uuid) -> Result<User> {
        let weight = self
            .weight
            .map(|w| non_negative("weight", w))
            .transpose()?;
        Ok(User {
            id,
            name: self.name,
            email: self.email,
            city: self.city,
            phone: self.phone,
            age: self.age,
            height: self.height,
            weight,
        })
    }
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<UserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>)> {
    let user = parse_body(payload)?.into_user(Uuid::now_v7())?;

    if state.users.get_user_by_email(&user.email).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "Email {} is already registered",
            user.email
        )));
    }

    state.users.create_user(&user).await?;
    tracing::info!(user_id = %user.id, "User created");

    Ok((StatusCode::CREATED, Json(user)))
}

async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>> {
    Ok(Json(state.users.list_users().await?))
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<User>> {
    let id = parse_id(&id, "user")?;
    state
        .users
        .get_user(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
}

async fn get_user_by_email(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<User>> {
    if !email.validate_email() {
        return Err(AppError::BadRequest("Invalid email format".to_string()));
    }

    state
        .users
        .get_user_by_email(&email)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UserRequest>, JsonRejection>,
) -> Result<Json<User>> {
    let id = parse_id(&id, "user")?;
    let user = parse_body(payload)?.into_user(id)?;

    if let Some(other) = state.users.get_user_by_email(&user.email).await? {
        if other.id != id {
            return Err(AppError::Conflict(format!(
                "Email {} is already registered",
                user.email
            )));
        }
    }

    if !state.users.update_user(&user).await? {
        return Err(AppError::NotFound(format!("User {} not found", id)));
    }
    Ok(Json(user))
}

async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_id(&id, "user")?;
    if !state.users.delete_user(id).await? {
        return Err(AppError::NotFound(format!("User {} not found", id)));
    }
    tracing::info!(user_id = %id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
