// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Prompt templates for the schedule agent.

use crate::services::tools::{
    GET_AVAILABLE_WORKOUTS, GET_PREVIOUS_SCHEDULES, GET_USER_PROFILE, SAVE_WORKOUT_SCHEDULE,
};
use crate::time_utils::WEEK_START_FORMAT;
use chrono::NaiveDate;

/// System instruction describing the agent's role and output shape.
pub const SYSTEM_PROMPT: &str = r#"You are a Workout Planning Agent that creates personalized weekly workout schedules.

You have access to tools to:
1. Fetch user profiles (age, weight, goals, experience level, preferences)
2. Get available workouts from the database (exercises for home/gym)
3. Check user's previous schedules to ensure variety
4. Save generated schedules to the database

Create balanced weekly schedules based on user's fitness goals, experience level, and available equipment.
Only reference workout IDs returned by the workout catalog tool.

Return schedules in this JSON structure:
{
  "workouts": [
    {
      "day": "Monday",
      "workout_ids": [1, 5, 8],
      "duration_minutes": 45,
      "intensity": "high",
      "notes": "Focus on upper body"
    }
  ],
  "rest_days": ["Sunday"],
  "weekly_summary": {
    "total_workouts": 4,
    "total_duration_minutes": 180,
    "primary_focus": "strength_training"
  }
}"#;

/// Task description for one schedule generation request.
pub fn build_task_prompt(user_id: i32, week_start: NaiveDate) -> String {
    let week_start = week_start.format(WEEK_START_FORMAT);
    format!(
        r#"Generate a personalized weekly workout schedule for user ID {user_id} starting on {week_start}.

Steps:
1. Use {GET_USER_PROFILE} to fetch their goals, experience, and preferences
2. Use {GET_AVAILABLE_WORKOUTS} to see what exercises are available
3. Use {GET_PREVIOUS_SCHEDULES} to check what they've done recently
4. Create a balanced weekly schedule
5. Use {SAVE_WORKOUT_SCHEDULE} to save it with user_id={user_id} and week_start_date="{week_start}"

Return the complete schedule as JSON."#
    )
}
