// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (PostgreSQL).
//!
//! Handlers and agent tools depend on [`WorkoutStore`] rather than a concrete
//! client so tests can substitute their own store.

pub mod postgres;

pub use postgres::PostgresDb;

use crate::error::AppError;
use crate::models::{Schedule, User, UserProfile, Workout, WorkoutType};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Upper bound on how many schedules a single listing may return.
pub const MAX_SCHEDULE_LIMIT: i64 = 52;

/// Data access used by the HTTP handlers and the agent's tools.
#[async_trait]
pub trait WorkoutStore: Send + Sync {
    /// Fetch a live (not soft-deleted) user.
    async fn get_user(&self, user_id: i32) -> Result<Option<User>, AppError>;

    /// Insert a new user and return the stored record.
    async fn create_user(&self, profile: &UserProfile) -> Result<User, AppError>;

    /// Overwrite a live user's profile. Returns `None` if no such user.
    async fn update_user(
        &self,
        user_id: i32,
        profile: &UserProfile,
    ) -> Result<Option<User>, AppError>;

    /// List catalog entries ordered by name, optionally restricted to one type.
    async fn list_workouts(&self, filter: Option<WorkoutType>) -> Result<Vec<Workout>, AppError>;

    /// Most recent schedules for a user, newest week first.
    async fn list_schedules(&self, user_id: i32, limit: i64) -> Result<Vec<Schedule>, AppError>;

    /// Insert or overwrite the schedule for (user, week). Returns the row id.
    async fn upsert_schedule(
        &self,
        user_id: i32,
        week_start_date: NaiveDate,
        plan_data: &serde_json::Value,
    ) -> Result<i32, AppError>;
}
