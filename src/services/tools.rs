// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data-access tools exposed to the schedule agent.
//!
//! Each tool wraps exactly one store operation and never fails the caller:
//! data-access and argument problems come back as [`ToolOutcome::Failure`]
//! so the model can read them and decide what to do next.

use crate::db::{WorkoutStore, MAX_SCHEDULE_LIMIT};
use crate::models::{PlanBody, WorkoutType};
use crate::services::llm::ToolDefinition;
use crate::time_utils::parse_week_start;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

pub const GET_USER_PROFILE: &str = "get_user_profile";
pub const GET_AVAILABLE_WORKOUTS: &str = "get_available_workouts";
pub const GET_PREVIOUS_SCHEDULES: &str = "get_previous_schedules";
pub const SAVE_WORKOUT_SCHEDULE: &str = "save_workout_schedule";

const DEFAULT_HISTORY_LIMIT: i64 = 4;

/// Result of running one tool.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    Success(Value),
    Failure(String),
}

impl ToolOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, ToolOutcome::Failure(_))
    }

    /// Text handed back to the model as the tool's observation.
    pub fn to_observation(&self) -> String {
        match self {
            ToolOutcome::Success(value) => value.to_string(),
            ToolOutcome::Failure(message) => json!({ "error": message }).to_string(),
        }
    }
}

#[derive(Deserialize)]
struct ProfileArgs {
    user_id: i32,
}

#[derive(Deserialize)]
struct WorkoutsArgs {
    #[serde(default)]
    workout_type: Option<String>,
}

fn default_history_limit() -> i64 {
    DEFAULT_HISTORY_LIMIT
}

#[derive(Deserialize)]
struct HistoryArgs {
    user_id: i32,
    #[serde(default = "default_history_limit")]
    limit: i64,
}

#[derive(Deserialize)]
struct SaveArgs {
    user_id: i32,
    week_start_date: String,
    plan_data: PlanBody,
}

/// The fixed set of tools available to the agent.
#[derive(Clone)]
pub struct ToolSet {
    store: Arc<dyn WorkoutStore>,
}

impl ToolSet {
    pub fn new(store: Arc<dyn WorkoutStore>) -> Self {
        Self { store }
    }

    /// Tool schemas advertised to the model.
    pub fn definitions() -> Vec<ToolDefinition> {
        vec![
            ToolDefinition {
                name: GET_USER_PROFILE,
                description: "Fetch a user's fitness profile: age, height, weight, goal, \
                              experience level, training days per week and preferred location.",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "user_id": {"type": "integer", "description": "User ID"}
                    },
                    "required": ["user_id"]
                }),
            },
            ToolDefinition {
                name: GET_AVAILABLE_WORKOUTS,
                description: "List the workout catalog. Filter by 'home' or 'gym' if specified; \
                              any other value returns every workout.",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "workout_type": {
                            "type": "string",
                            "description": "Optional location filter: 'home' or 'gym'"
                        }
                    }
                }),
            },
            ToolDefinition {
                name: GET_PREVIOUS_SCHEDULES,
                description: "Get the user's most recent workout schedules, newest week first, \
                              to keep the new plan varied.",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "user_id": {"type": "integer", "description": "User ID"},
                        "limit": {
                            "type": "integer",
                            "description": "How many schedules to return (default 4)",
                            "minimum": 1,
                            "maximum": MAX_SCHEDULE_LIMIT
                        }
                    },
                    "required": ["user_id"]
                }),
            },
            ToolDefinition {
                name: SAVE_WORKOUT_SCHEDULE,
                description: "Save the generated weekly schedule, replacing any schedule already \
                              stored for that user and week.",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "user_id": {"type": "integer", "description": "User ID"},
                        "week_start_date": {
                            "type": "string",
                            "description": "Week start date as YYYY-MM-DD"
                        },
                        "plan_data": {
                            "type": ["object", "string"],
                            "description": "The schedule JSON, as an object or a serialized string"
                        }
                    },
                    "required": ["user_id", "week_start_date", "plan_data"]
                }),
            },
        ]
    }

    /// Run the named tool with model-supplied arguments.
    pub async fn execute(&self, name: &str, input: &Value) -> ToolOutcome {
        let outcome = match name {
            GET_USER_PROFILE => match parse_args::<ProfileArgs>(name, input) {
                Ok(args) => self.get_user_profile(args.user_id).await,
                Err(failure) => failure,
            },
            GET_AVAILABLE_WORKOUTS => match parse_args::<WorkoutsArgs>(name, input) {
                Ok(args) => {
                    self.get_available_workouts(args.workout_type.as_deref())
                        .await
                }
                Err(failure) => failure,
            },
            GET_PREVIOUS_SCHEDULES => match parse_args::<HistoryArgs>(name, input) {
                Ok(args) => self.get_previous_schedules(args.user_id, args.limit).await,
                Err(failure) => failure,
            },
            SAVE_WORKOUT_SCHEDULE => match parse_args::<SaveArgs>(name, input) {
                Ok(args) => {
                    self.save_workout_schedule(args.user_id, &args.week_start_date, args.plan_data)
                        .await
                }
                Err(failure) => failure,
            },
            unknown => ToolOutcome::Failure(format!("Unknown tool: {}", unknown)),
        };

        if let ToolOutcome::Failure(message) = &outcome {
            tracing::warn!(tool = name, error = %message, "Tool call failed");
        } else {
            tracing::debug!(tool = name, "Tool call succeeded");
        }
        outcome
    }

    /// Fetch a live user's profile.
    pub async fn get_user_profile(&self, user_id: i32) -> ToolOutcome {
        match self.store.get_user(user_id).await {
            Ok(Some(user)) => to_success(&user),
            Ok(None) => ToolOutcome::Failure("User not found".to_string()),
            Err(e) => ToolOutcome::Failure(e.to_string()),
        }
    }

    /// List the catalog, optionally restricted to `home` or `gym`.
    pub async fn get_available_workouts(&self, workout_type: Option<&str>) -> ToolOutcome {
        let filter = WorkoutType::from_filter(workout_type);
        match self.store.list_workouts(filter).await {
            Ok(workouts) => to_success(&workouts),
            Err(e) => ToolOutcome::Failure(format!("Error fetching workouts: {}", e)),
        }
    }

    /// Most recent schedules for a user; an empty list is a valid answer.
    pub async fn get_previous_schedules(&self, user_id: i32, limit: i64) -> ToolOutcome {
        let limit = limit.clamp(1, MAX_SCHEDULE_LIMIT);
        match self.store.list_schedules(user_id, limit).await {
            Ok(schedules) => to_success(&schedules),
            Err(e) => ToolOutcome::Failure(format!("Error fetching schedules: {}", e)),
        }
    }

    /// Upsert the plan for (user, week).
    pub async fn save_workout_schedule(
        &self,
        user_id: i32,
        week_start_date: &str,
        plan_data: PlanBody,
    ) -> ToolOutcome {
        let week_start = match parse_week_start(week_start_date) {
            Ok(date) => date,
            Err(_) => {
                return ToolOutcome::Failure(format!(
                    "Invalid week_start_date '{}': expected YYYY-MM-DD",
                    week_start_date
                ))
            }
        };

        let document = match plan_data.into_document() {
            Ok(document) => document,
            Err(e) => return ToolOutcome::Failure(format!("Error saving schedule: {}", e)),
        };

        match self
            .store
            .upsert_schedule(user_id, week_start, &document)
            .await
        {
            Ok(schedule_id) => ToolOutcome::Success(json!({
                "schedule_id": schedule_id,
                "message": format!("Schedule saved successfully with ID: {}", schedule_id),
            })),
            Err(e) => ToolOutcome::Failure(format!("Error saving schedule: {}", e)),
        }
    }
}

fn parse_args<T: DeserializeOwned>(tool: &str, input: &Value) -> Result<T, ToolOutcome> {
    serde_json::from_value(input.clone())
        .map_err(|e| ToolOutcome::Failure(format!("Invalid arguments for {}: {}", tool, e)))
}

fn to_success<T: serde::Serialize>(value: &T) -> ToolOutcome {
    match serde_json::to_value(value) {
        Ok(value) => ToolOutcome::Success(value),
        Err(e) => ToolOutcome::Failure(format!("Could not encode result: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definitions_cover_every_tool() {
        let names: Vec<_> = ToolSet::definitions().iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec![
                GET_USER_PROFILE,
                GET_AVAILABLE_WORKOUTS,
                GET_PREVIOUS_SCHEDULES,
                SAVE_WORKOUT_SCHEDULE
            ]
        );
        for definition in ToolSet::definitions() {
            assert_eq!(definition.input_schema["type"], "object");
        }
    }

    #[test]
    fn test_failure_observation_is_structured() {
        let failure = ToolOutcome::Failure("User not found".to_string());
        assert!(failure.is_failure());
        let observation: Value = serde_json::from_str(&failure.to_observation()).unwrap();
        assert_eq!(observation, json!({"error": "User not found"}));
    }

    #[test]
    fn test_history_limit_defaults_to_four() {
        let args: HistoryArgs = serde_json::from_value(json!({"user_id": 3})).unwrap();
        assert_eq!(args.limit, 4);
    }

    #[test]
    fn test_bad_arguments_become_failures() {
        let err = parse_args::<ProfileArgs>(GET_USER_PROFILE, &json!({"user_id": "abc"}))
            .err()
            .unwrap();
        match err {
            ToolOutcome::Failure(message) => {
                assert!(message.starts_with("Invalid arguments for get_user_profile"))
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }
}
