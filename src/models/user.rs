// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

text_enum! {
    /// What the user wants out of training.
    Goal, "goal" {
        LoseFat => "lose_fat",
        GainMuscle => "gain_muscle",
        Maintain => "maintain",
    }
}

text_enum! {
    /// Self-reported training experience.
    ExperienceLevel, "experience level" {
        Beginner => "beginner",
        Intermediate => "intermediate",
        Advanced => "advanced",
    }
}

text_enum! {
    /// Where the user prefers to train.
    WorkoutLocation, "workout location" {
        Home => "home",
        Gym => "gym",
        Both => "both",
    }
}

text_enum! {
    DietPreference, "diet preference" {
        Standard => "standard",
        Vegetarian => "vegetarian",
        Vegan => "vegan",
        Keto => "keto",
        Paleo => "paleo",
    }
}

fn default_days_per_week() -> i32 {
    3
}

/// Profile fields submitted when creating or updating a user.
///
/// Field names follow the frontend's payload, which mixes camelCase
/// and snake_case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct UserProfile {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 13, max = 120))]
    pub age: i32,
    /// Height in centimetres
    #[validate(range(exclusive_min = 0.0, exclusive_max = 250.0))]
    pub height: f64,
    /// Weight in kilograms
    #[validate(range(exclusive_min = 30.0, exclusive_max = 300.0))]
    pub weight: f64,
    pub goal: Goal,
    #[serde(rename = "experienceLevel")]
    pub experience_level: ExperienceLevel,
    #[serde(rename = "daysPerWeek", default = "default_days_per_week")]
    #[validate(range(min = 1, max = 7))]
    pub days_per_week: i32,
    pub workout_location: WorkoutLocation,
    #[serde(default)]
    pub diet_preference: Option<DietPreference>,
}

/// User profile stored in the `users` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(ts_rs::TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub height: f64,
    pub weight: f64,
    pub goal: Goal,
    pub experience_level: ExperienceLevel,
    pub days_per_week: i32,
    pub workout_location: WorkoutLocation,
    pub diet_preference: Option<DietPreference>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a stored user from submitted profile fields.
    pub fn from_profile(
        id: i32,
        profile: &UserProfile,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: profile.name.clone(),
            age: profile.age,
            height: profile.height,
            weight: profile.weight,
            goal: profile.goal,
            experience_level: profile.experience_level,
            days_per_week: profile.days_per_week,
            workout_location: profile.workout_location,
            diet_preference: profile.diet_preference,
            created_at,
            updated_at,
        }
    }
}
