// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile routes.

use crate::error::{AppError, Result};
use crate::models::{User, UserProfile};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users", post(save_user))
        .route("/api/users/{user_id}", get(get_user))
}

// ─── Create / Update ─────────────────────────────────────────

#[derive(Deserialize)]
struct SaveUserQuery {
    /// Update this user instead of creating a new one
    user_id: Option<i32>,
}

/// Response for a profile write.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct SaveUserResponse {
    pub message: String,
    pub user: User,
}

/// Create a profile, or overwrite one when `?user_id=` is given.
async fn save_user(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SaveUserQuery>,
    Json(profile): Json<UserProfile>,
) -> Result<(StatusCode, Json<SaveUserResponse>)> {
    profile.validate()?;

    match query.user_id {
        Some(user_id) => {
            let user = state
                .db
                .update_user(user_id, &profile)
                .await?
                .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

            Ok((
                StatusCode::OK,
                Json(SaveUserResponse {
                    message: "Profile updated successfully".to_string(),
                    user,
                }),
            ))
        }
        None => {
            let user = state.db.create_user(&profile).await?;

            Ok((
                StatusCode::CREATED,
                Json(SaveUserResponse {
                    message: "Profile created successfully".to_string(),
                    user,
                }),
            ))
        }
    }
}

// ─── Lookup ──────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct UserLookupResponse {
    pub user: User,
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
) -> Result<Json<UserLookupResponse>> {
    let user = state
        .db
        .get_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(UserLookupResponse { user }))
}
