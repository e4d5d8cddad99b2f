// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod agent;
pub mod catalog;
pub mod llm;
pub mod prompt;
pub mod tools;

pub use agent::{
    AgentError, AgentRun, AgentSettings, AgentTrace, GeneratedSchedule, ScheduleAgent,
    ScheduleOutcome,
};
pub use catalog::WORKOUT_CATALOG;
pub use llm::{AnthropicClient, LlmClient, LlmError};
pub use tools::{ToolOutcome, ToolSet};
