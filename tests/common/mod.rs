// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use chrono::{NaiveDate, Utc};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use workout_planner::config::Config;
use workout_planner::db::WorkoutStore;
use workout_planner::error::AppError;
use workout_planner::models::{Schedule, User, UserProfile, Workout, WorkoutType};
use workout_planner::routes::create_router;
use workout_planner::services::llm::{Completion, CompletionRequest, ContentBlock};
use workout_planner::services::{
    AgentSettings, LlmClient, LlmError, ScheduleAgent, WORKOUT_CATALOG,
};
use workout_planner::AppState;

// ─── In-memory store ─────────────────────────────────────────

#[derive(Default)]
struct Tables {
    users: Vec<(User, bool)>,
    workouts: Vec<Workout>,
    schedules: Vec<Schedule>,
}

/// `WorkoutStore` backed by plain vectors. Soft deletion is a flag per user.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

#[allow(dead_code)]
impl InMemoryStore {
    /// Store pre-populated with the built-in catalog, ids starting at 1.
    pub fn with_catalog() -> Self {
        let store = Self::default();
        {
            let mut tables = store.tables.lock().unwrap();
            for (i, w) in WORKOUT_CATALOG.iter().enumerate() {
                tables.workouts.push(Workout {
                    id: i as i32 + 1,
                    name: w.name.to_string(),
                    workout_type: w.workout_type,
                    equipment: Some(w.equipment.to_string()),
                    muscles: Some(w.muscles.to_string()),
                    instructions: w.instructions.to_string(),
                });
            }
        }
        store
    }

    pub fn soft_delete_user(&self, user_id: i32) {
        let mut tables = self.tables.lock().unwrap();
        for (user, deleted) in tables.users.iter_mut() {
            if user.id == user_id {
                *deleted = true;
            }
        }
    }

    pub fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }

    pub fn schedules(&self) -> Vec<Schedule> {
        self.tables.lock().unwrap().schedules.clone()
    }
}

#[async_trait]
impl WorkoutStore for InMemoryStore {
    async fn get_user(&self, user_id: i32) -> Result<Option<User>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .find(|(u, deleted)| u.id == user_id && !deleted)
            .map(|(u, _)| u.clone()))
    }

    async fn create_user(&self, profile: &UserProfile) -> Result<User, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.users.len() as i32 + 1;
        let now = Utc::now();
        let user = User::from_profile(id, profile, now, now);
        tables.users.push((user.clone(), false));
        Ok(user)
    }

    async fn update_user(
        &self,
        user_id: i32,
        profile: &UserProfile,
    ) -> Result<Option<User>, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let Some((user, _)) = tables
            .users
            .iter_mut()
            .find(|(u, deleted)| u.id == user_id && !deleted)
        else {
            return Ok(None);
        };
        *user = User::from_profile(user_id, profile, user.created_at, Utc::now());
        Ok(Some(user.clone()))
    }

    async fn list_workouts(&self, filter: Option<WorkoutType>) -> Result<Vec<Workout>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut workouts: Vec<Workout> = tables
            .workouts
            .iter()
            .filter(|w| filter.map_or(true, |t| w.workout_type == t))
            .cloned()
            .collect();
        workouts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(workouts)
    }

    async fn list_schedules(&self, user_id: i32, limit: i64) -> Result<Vec<Schedule>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut schedules: Vec<Schedule> = tables
            .schedules
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        schedules.sort_by(|a, b| b.week_start_date.cmp(&a.week_start_date));
        schedules.truncate(limit.max(0) as usize);
        Ok(schedules)
    }

    async fn upsert_schedule(
        &self,
        user_id: i32,
        week_start_date: NaiveDate,
        plan_data: &Value,
    ) -> Result<i32, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let now = Utc::now();
        if let Some(existing) = tables
            .schedules
            .iter_mut()
            .find(|s| s.user_id == user_id && s.week_start_date == week_start_date)
        {
            existing.plan_data = plan_data.clone();
            existing.updated_at = now;
            return Ok(existing.id);
        }

        let id = tables.schedules.len() as i32 + 1;
        tables.schedules.push(Schedule {
            id,
            user_id,
            week_start_date,
            plan_data: plan_data.clone(),
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }
}

// ─── Scripted model ──────────────────────────────────────────

/// `LlmClient` that replays queued replies and records every request body.
#[derive(Default)]
pub struct ScriptedLlm {
    replies: Mutex<VecDeque<Result<Completion, LlmError>>>,
    requests: Mutex<Vec<Value>>,
}

#[allow(dead_code)]
impl ScriptedLlm {
    pub fn new(replies: Vec<Result<Completion, LlmError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Serialized requests in call order.
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<Completion, LlmError> {
        self.requests
            .lock()
            .unwrap()
            .push(serde_json::to_value(request).unwrap());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::Http("script exhausted".to_string())))
    }
}

/// A reply requesting one or more tool calls, given as (id, name, input).
#[allow(dead_code)]
pub fn tool_use_reply(calls: &[(&str, &str, Value)]) -> Result<Completion, LlmError> {
    Ok(Completion {
        content: calls
            .iter()
            .map(|(id, name, input)| ContentBlock::ToolUse {
                id: id.to_string(),
                name: name.to_string(),
                input: input.clone(),
            })
            .collect(),
        stop_reason: Some("tool_use".to_string()),
        usage: None,
    })
}

/// A final text reply.
#[allow(dead_code)]
pub fn text_reply(text: &str) -> Result<Completion, LlmError> {
    Ok(Completion {
        content: vec![ContentBlock::Text {
            text: text.to_string(),
        }],
        stop_reason: Some("end_turn".to_string()),
        usage: None,
    })
}

/// Plan document matching the shape the agent is asked to produce.
#[allow(dead_code)]
pub fn sample_plan() -> Value {
    json!({
        "workouts": [
            {
                "day": "Monday",
                "workout_ids": [1, 2, 3],
                "duration_minutes": 30,
                "intensity": "moderate",
                "notes": "Full body basics"
            },
            {
                "day": "Thursday",
                "workout_ids": [4, 5],
                "duration_minutes": 25,
                "intensity": "low",
                "notes": "Legs and conditioning"
            }
        ],
        "rest_days": ["Tuesday", "Wednesday", "Friday", "Saturday", "Sunday"],
        "weekly_summary": {
            "total_workouts": 2,
            "total_duration_minutes": 55,
            "primary_focus": "general_fitness"
        }
    })
}

/// Valid profile body in the wire format accepted by `POST /api/users`.
#[allow(dead_code)]
pub fn ann_profile() -> Value {
    json!({
        "name": "Ann",
        "age": 30,
        "height": 170,
        "weight": 65,
        "goal": "maintain",
        "experienceLevel": "beginner",
        "daysPerWeek": 3,
        "workout_location": "home"
    })
}

#[allow(dead_code)]
pub fn test_settings(max_steps: usize) -> AgentSettings {
    AgentSettings {
        model: "test-model".to_string(),
        max_tokens: 256,
        max_steps,
    }
}

// ─── Test app ────────────────────────────────────────────────

/// Router plus handles on the substituted dependencies.
#[allow(dead_code)]
pub struct TestApp {
    pub router: axum::Router,
    pub state: Arc<AppState>,
    pub store: Arc<InMemoryStore>,
    pub llm: Arc<ScriptedLlm>,
}

/// Create a test app over an in-memory store and a model with no replies.
#[allow(dead_code)]
pub fn create_test_app() -> TestApp {
    create_test_app_with(Vec::new())
}

/// Create a test app whose model returns `replies` in order.
#[allow(dead_code)]
pub fn create_test_app_with(replies: Vec<Result<Completion, LlmError>>) -> TestApp {
    let config = Config::default();
    let store = Arc::new(InMemoryStore::with_catalog());
    let llm = Arc::new(ScriptedLlm::new(replies));

    let agent = ScheduleAgent::new(
        llm.clone(),
        store.clone(),
        test_settings(config.agent_max_steps),
    );
    let state = Arc::new(AppState {
        config,
        db: store.clone(),
        agent,
    });

    TestApp {
        router: create_router(state.clone()),
        state,
        store,
        llm,
    }
}

// ─── HTTP helpers ────────────────────────────────────────────

#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[allow(dead_code)]
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
