// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Schedule routes: agent-driven generation plus direct reads and writes.

use crate::db::MAX_SCHEDULE_LIMIT;
use crate::error::{AppError, Result};
use crate::models::{Schedule, WeeklyPlan};
use crate::time_utils::{parse_week_start, WEEK_START_FORMAT};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ai/schedule", post(generate_schedule))
        .route("/schedule/{user_id}", get(get_schedules))
        .route("/schedule", post(save_schedule))
}

/// Parse a `YYYY-MM-DD` request field, mapping failures to 400.
fn week_start_param(raw: &str) -> Result<NaiveDate> {
    parse_week_start(raw).map_err(|_| {
        AppError::BadRequest(format!(
            "Invalid week_start_date '{}': expected YYYY-MM-DD",
            raw
        ))
    })
}

// ─── Generation ──────────────────────────────────────────────

#[derive(Deserialize)]
struct GenerateScheduleRequest {
    user_id: i32,
    #[serde(default)]
    week_start_date: Option<String>,
}

/// Agent result; failures are reported in the body rather than the status.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
#[serde(untagged)]
pub enum GenerateScheduleResponse {
    Generated {
        success: bool,
        user_id: i32,
        week_start_date: String,
        schedule: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        plan: Option<WeeklyPlan>,
        message: String,
    },
    Failed {
        success: bool,
        user_id: i32,
        week_start_date: String,
        error: String,
    },
}

/// Run the agent to plan and save a week of workouts.
async fn generate_schedule(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateScheduleRequest>,
) -> Result<Json<GenerateScheduleResponse>> {
    let week_start = match request.week_start_date.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(week_start_param(raw)?),
        _ => None,
    };

    let outcome = state
        .agent
        .generate_weekly_schedule(request.user_id, week_start)
        .await;
    let week_start_date = outcome
        .week_start_date
        .format(WEEK_START_FORMAT)
        .to_string();

    let response = match outcome.result {
        Ok(generated) => {
            tracing::info!(
                user_id = outcome.user_id,
                tools = ?generated.trace.tools_called(),
                structured = generated.plan.is_some(),
                "Schedule generated"
            );
            GenerateScheduleResponse::Generated {
                success: true,
                user_id: outcome.user_id,
                week_start_date,
                schedule: generated.schedule,
                plan: generated.plan,
                message: "Schedule generated and saved successfully".to_string(),
            }
        }
        Err(e) => GenerateScheduleResponse::Failed {
            success: false,
            user_id: outcome.user_id,
            week_start_date,
            error: e.to_string(),
        },
    };

    Ok(Json(response))
}

// ─── History ─────────────────────────────────────────────────

#[derive(Deserialize)]
struct ScheduleQuery {
    limit: Option<i64>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct SchedulesResponse {
    pub success: bool,
    pub user_id: i32,
    pub count: usize,
    pub schedules: Vec<Schedule>,
}

/// Most recent schedules for a user, newest week first.
async fn get_schedules(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<SchedulesResponse>> {
    let limit = query.limit.unwrap_or(1);
    if limit < 1 {
        return Err(AppError::BadRequest(
            "limit must be at least 1".to_string(),
        ));
    }

    let schedules = state
        .db
        .list_schedules(user_id, limit.min(MAX_SCHEDULE_LIMIT))
        .await?;
    if schedules.is_empty() {
        return Err(AppError::NotFound(
            "No schedules found for this user".to_string(),
        ));
    }

    Ok(Json(SchedulesResponse {
        success: true,
        user_id,
        count: schedules.len(),
        schedules,
    }))
}

// ─── Direct Save ─────────────────────────────────────────────

#[derive(Deserialize)]
struct SaveScheduleRequest {
    user_id: i32,
    week_start_date: String,
    plan_data: Map<String, Value>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct SaveScheduleResponse {
    pub success: bool,
    pub message: String,
    pub schedule_id: i32,
    pub user_id: i32,
    pub week_start_date: String,
}

/// Store a plan for (user, week), replacing any existing one.
async fn save_schedule(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SaveScheduleRequest>,
) -> Result<Json<SaveScheduleResponse>> {
    let week_start = week_start_param(&request.week_start_date)?;
    let plan_data = Value::Object(request.plan_data);

    let schedule_id = state
        .db
        .upsert_schedule(request.user_id, week_start, &plan_data)
        .await?;

    Ok(Json(SaveScheduleResponse {
        success: true,
        message: "Schedule saved successfully".to_string(),
        schedule_id,
        user_id: request.user_id,
        week_start_date: week_start.format(WEEK_START_FORMAT).to_string(),
    }))
}
