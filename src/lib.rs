// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout Planner: AI-generated weekly workout schedules
//!
//! This crate provides the backend API for storing user fitness profiles and
//! having a language model agent plan and save a week of training for them.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::WorkoutStore;
use services::ScheduleAgent;
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Arc<dyn WorkoutStore>,
    pub agent: ScheduleAgent,
}
