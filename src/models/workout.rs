// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout catalog model.

use serde::{Deserialize, Serialize};

text_enum! {
    /// Where an exercise can be performed.
    WorkoutType, "workout type" {
        Home => "home",
        Gym => "gym",
    }
}

impl WorkoutType {
    /// Interpret an optional catalog filter.
    ///
    /// Anything other than `home` or `gym` means "no filter".
    pub fn from_filter(filter: Option<&str>) -> Option<Self> {
        filter.and_then(|f| f.trim().parse().ok())
    }
}

/// Catalog entry from the `workouts` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(ts_rs::TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct Workout {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    pub equipment: Option<String>,
    pub muscles: Option<String>,
    pub instructions: String,
}

/// Catalog entry to be inserted by the seed tool.
#[derive(Debug, Clone, Copy)]
pub struct NewWorkout {
    pub name: &'static str,
    pub workout_type: WorkoutType,
    pub equipment: &'static str,
    pub muscles: &'static str,
    pub instructions: &'static str,
}
