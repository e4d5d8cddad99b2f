// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! PostgreSQL client wrapper with typed operations.
//!
//! Provides parameterized queries for:
//! - Users (profile storage, soft deletion aware)
//! - Workouts (read-only catalog)
//! - Schedules (weekly plans, upserted per user and week)
//!
//! Every operation borrows a pooled connection for its own duration only.
//! Writes run in a transaction that rolls back when dropped uncommitted.

use super::{WorkoutStore, MAX_SCHEDULE_LIMIT};
use crate::config::Config;
use crate::error::AppError;
use crate::models::{NewWorkout, Schedule, User, UserProfile, Workout, WorkoutType};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

const USER_COLUMNS: &str = "id, name, age, height, weight, goal, experience_level, \
     days_per_week, workout_location, diet_preference, created_at, updated_at";

/// PostgreSQL database client.
#[derive(Clone)]
pub struct PostgresDb {
    pool: PgPool,
}

impl PostgresDb {
    /// Open a connection pool using the configured credentials.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect_with(config.pg_connect_options())
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to PostgreSQL: {}", e)))?;

        tracing::info!(
            host = %config.db_host,
            database = %config.db_name,
            "Connected to PostgreSQL"
        );

        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying pool, for tooling that runs raw SQL.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // ─── Catalog Seeding ─────────────────────────────────────────

    /// Insert the given catalog unless the table already has rows.
    ///
    /// Returns how many rows were inserted (0 when skipped).
    pub async fn seed_workouts(&self, catalog: &[NewWorkout]) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM workouts")
            .fetch_one(&mut *tx)
            .await?;
        if existing > 0 {
            tracing::info!(existing, "Workouts table already populated, skipping seed");
            return Ok(0);
        }

        let mut inserted = 0;
        for workout in catalog {
            inserted += sqlx::query(
                "INSERT INTO workouts (name, type, equipment, muscles, instructions, created_at, updated_at)
                 VALUES ($1, $2, $3, $4, $5, NOW(), NOW())",
            )
            .bind(workout.name)
            .bind(workout.workout_type.as_str())
            .bind(workout.equipment)
            .bind(workout.muscles)
            .bind(workout.instructions)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        }

        tx.commit().await?;
        tracing::info!(inserted, "Seeded workout catalog");
        Ok(inserted)
    }
}

#[async_trait]
impl WorkoutStore for PostgresDb {
    // ─── User Operations ─────────────────────────────────────────

    async fn get_user(&self, user_id: i32) -> Result<Option<User>, AppError> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL"
        );
        let row = sqlx::query(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn create_user(&self, profile: &UserProfile) -> Result<User, AppError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "INSERT INTO users (name, age, height, weight, goal, experience_level,
                                days_per_week, workout_location, diet_preference,
                                created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW(), NOW())
             RETURNING {USER_COLUMNS}"
        );
        let row = bind_profile(sqlx::query(&sql), profile)
            .fetch_one(&mut *tx)
            .await?;
        let user = user_from_row(&row)?;

        tx.commit().await?;
        tracing::info!(user_id = user.id, "Created user");
        Ok(user)
    }

    async fn update_user(
        &self,
        user_id: i32,
        profile: &UserProfile,
    ) -> Result<Option<User>, AppError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "UPDATE users
             SET name = $1, age = $2, height = $3, weight = $4, goal = $5,
                 experience_level = $6, days_per_week = $7, workout_location = $8,
                 diet_preference = $9, updated_at = NOW()
             WHERE id = $10 AND deleted_at IS NULL
             RETURNING {USER_COLUMNS}"
        );
        let row = bind_profile(sqlx::query(&sql), profile)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let user = user_from_row(&row)?;

        tx.commit().await?;
        tracing::info!(user_id, "Updated user");
        Ok(Some(user))
    }

    // ─── Workout Catalog ─────────────────────────────────────────

    async fn list_workouts(&self, filter: Option<WorkoutType>) -> Result<Vec<Workout>, AppError> {
        let rows = match filter {
            Some(workout_type) => {
                sqlx::query(
                    "SELECT id, name, type, equipment, muscles, instructions
                     FROM workouts
                     WHERE type = $1
                     ORDER BY name",
                )
                .bind(workout_type.as_str())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    "SELECT id, name, type, equipment, muscles, instructions
                     FROM workouts
                     ORDER BY name",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.iter().map(workout_from_row).collect()
    }

    // ─── Schedule Operations ─────────────────────────────────────

    async fn list_schedules(&self, user_id: i32, limit: i64) -> Result<Vec<Schedule>, AppError> {
        let rows = sqlx::query(
            "SELECT id, user_id, week_start_date, plan_data::text AS plan_data,
                    created_at, updated_at
             FROM schedules
             WHERE user_id = $1
             ORDER BY week_start_date DESC
             LIMIT $2",
        )
        .bind(user_id)
        .bind(limit.clamp(1, MAX_SCHEDULE_LIMIT))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(schedule_from_row).collect()
    }

    async fn upsert_schedule(
        &self,
        user_id: i32,
        week_start_date: NaiveDate,
        plan_data: &serde_json::Value,
    ) -> Result<i32, AppError> {
        let plan_json = serde_json::to_string(plan_data)
            .map_err(|e| AppError::Internal(anyhow::Error::new(e)))?;

        let mut tx = self.pool.begin().await?;

        let schedule_id: i32 = sqlx::query_scalar(
            "INSERT INTO schedules (user_id, week_start_date, plan_data, created_at, updated_at)
             VALUES ($1, $2, CAST($3 AS JSONB), NOW(), NOW())
             ON CONFLICT (user_id, week_start_date)
             DO UPDATE SET plan_data = EXCLUDED.plan_data, updated_at = NOW()
             RETURNING id",
        )
        .bind(user_id)
        .bind(week_start_date)
        .bind(plan_json)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::info!(
            user_id,
            schedule_id,
            week_start = %week_start_date,
            "Saved schedule"
        );
        Ok(schedule_id)
    }
}

// ─── Row Mapping ─────────────────────────────────────────────

fn bind_profile<'q>(
    query: sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>,
    profile: &'q UserProfile,
) -> sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments> {
    query
        .bind(&profile.name)
        .bind(profile.age)
        .bind(profile.height)
        .bind(profile.weight)
        .bind(profile.goal.as_str())
        .bind(profile.experience_level.as_str())
        .bind(profile.days_per_week)
        .bind(profile.workout_location.as_str())
        .bind(profile.diet_preference.map(|d| d.as_str()))
}

fn parse_column<T>(row: &PgRow, column: &str) -> Result<T, AppError>
where
    T: std::str::FromStr<Err = crate::models::UnknownVariant>,
{
    let raw: String = row.try_get(column)?;
    raw.parse()
        .map_err(|e: crate::models::UnknownVariant| AppError::Database(e.to_string()))
}

fn user_from_row(row: &PgRow) -> Result<User, AppError> {
    let diet_preference: Option<String> = row.try_get("diet_preference")?;
    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        age: row.try_get("age")?,
        height: row.try_get("height")?,
        weight: row.try_get("weight")?,
        goal: parse_column(row, "goal")?,
        experience_level: parse_column(row, "experience_level")?,
        days_per_week: row.try_get("days_per_week")?,
        workout_location: parse_column(row, "workout_location")?,
        diet_preference: diet_preference
            .map(|d| d.parse())
            .transpose()
            .map_err(|e: crate::models::UnknownVariant| AppError::Database(e.to_string()))?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn workout_from_row(row: &PgRow) -> Result<Workout, AppError> {
    Ok(Workout {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        workout_type: parse_column(row, "type")?,
        equipment: row.try_get("equipment")?,
        muscles: row.try_get("muscles")?,
        instructions: row.try_get("instructions")?,
    })
}

fn schedule_from_row(row: &PgRow) -> Result<Schedule, AppError> {
    let plan_text: String = row.try_get("plan_data")?;
    let plan_data = serde_json::from_str(&plan_text).map_err(|e| {
        AppError::Database(format!("Stored plan_data is not valid JSON: {}", e))
    })?;

    Ok(Schedule {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        week_start_date: row.try_get("week_start_date")?,
        plan_data,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
