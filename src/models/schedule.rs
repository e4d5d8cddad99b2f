// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly schedule model.
//!
//! The plan body is persisted as serialized JSON and handed back exactly as
//! written. [`WeeklyPlan`] is a typed, lenient view over that document for
//! callers that want structure; it never changes what is stored.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Stored schedule row, unique per (user, week start).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(ts_rs::TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct Schedule {
    pub id: i32,
    pub user_id: i32,
    pub week_start_date: NaiveDate,
    pub plan_data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Typed view of a weekly plan document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(ts_rs::TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
#[serde(default)]
pub struct WeeklyPlan {
    pub workouts: Vec<DayPlan>,
    pub rest_days: Vec<String>,
    pub weekly_summary: WeeklySummary,
}

/// Workouts assigned to one day of the week.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(ts_rs::TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
#[serde(default)]
pub struct DayPlan {
    pub day: String,
    pub workout_ids: Vec<i64>,
    pub duration_minutes: u32,
    pub intensity: String,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(ts_rs::TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
#[serde(default)]
pub struct WeeklySummary {
    pub total_workouts: u32,
    pub total_duration_minutes: u32,
    pub primary_focus: String,
}

impl WeeklyPlan {
    /// Pull a plan out of free-form model output.
    ///
    /// Accepts a bare JSON object or one wrapped in a fenced code block,
    /// possibly surrounded by prose. Returns `None` unless the object has a
    /// `workouts` key.
    pub fn from_agent_output(text: &str) -> Option<Self> {
        let value = extract_json_object(text)?;
        if !value.as_object()?.contains_key("workouts") {
            return None;
        }
        serde_json::from_value(value).ok()
    }
}

fn extract_json_object(text: &str) -> Option<Value> {
    let candidate = fenced_block(text).unwrap_or(text);
    let start = candidate.find('{')?;
    let end = candidate.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str::<Value>(&candidate[start..=end])
        .ok()
        .filter(Value::is_object)
}

fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_fence = &text[open + 3..];
    let body_start = after_fence.find('\n')? + 1;
    let body = &after_fence[body_start..];
    let close = body.find("```")?;
    Some(&body[..close])
}

/// Plan body as supplied to the save operation: either the document itself
/// or a string holding its serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlanBody {
    Serialized(String),
    Document(Map<String, Value>),
}

/// Reasons a plan body cannot be stored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanBodyError {
    #[error("plan_data is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("plan_data must be a JSON object")]
    NotAnObject,
}

impl PlanBody {
    /// Normalize to the structured document that gets persisted.
    pub fn into_document(self) -> Result<Value, PlanBodyError> {
        match self {
            PlanBody::Document(map) => Ok(Value::Object(map)),
            PlanBody::Serialized(raw) => {
                let value: Value = serde_json::from_str(&raw)
                    .map_err(|e| PlanBodyError::InvalidJson(e.to_string()))?;
                if value.is_object() {
                    Ok(value)
                } else {
                    Err(PlanBodyError::NotAnObject)
                }
            }
        }
    }
}
