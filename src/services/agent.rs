// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Schedule agent: a bounded tool-calling loop over the workout store.
//!
//! The loop alternates between asking the model for a decision and executing
//! the tools it requested, one at a time, until the model answers without
//! calling a tool or the step budget runs out.

use crate::config::Config;
use crate::db::WorkoutStore;
use crate::models::WeeklyPlan;
use crate::services::llm::{
    AnthropicClient, CompletionRequest, ContentBlock, LlmClient, LlmError, Message, ToolCall,
    ToolDefinition,
};
use crate::services::prompt::{build_task_prompt, SYSTEM_PROMPT};
use crate::services::tools::ToolSet;
use crate::time_utils::next_monday;
use chrono::{NaiveDate, Utc};
use serde_json::Value;
use std::sync::Arc;

/// Model parameters fixed at construction time.
#[derive(Debug, Clone)]
pub struct AgentSettings {
    pub model: String,
    pub max_tokens: u32,
    /// Max model decisions per run
    pub max_steps: usize,
}

impl From<&Config> for AgentSettings {
    fn from(config: &Config) -> Self {
        Self {
            model: config.agent_model.clone(),
            max_tokens: config.agent_max_tokens,
            max_steps: config.agent_max_steps,
        }
    }
}

/// Why an agent run ended without an answer.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("Agent did not finish within {0} steps")]
    StepLimitExceeded(usize),

    #[error("LLM returned an empty response")]
    EmptyResponse,
}

/// One executed tool call.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceStep {
    pub tool: String,
    pub input: Value,
    pub failed: bool,
}

/// Tool calls made during a run, in execution order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentTrace {
    pub steps: Vec<TraceStep>,
}

impl AgentTrace {
    pub fn tools_called(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.tool.as_str()).collect()
    }
}

/// Successful run.
#[derive(Debug, Clone)]
pub struct AgentRun {
    /// Final model text
    pub output: String,
    /// Model decisions taken, including the final one
    pub decisions: usize,
    pub trace: AgentTrace,
}

enum AgentState {
    AwaitingDecision,
    ExecutingTools(Vec<ToolCall>),
    Terminal(String),
}

/// A generated schedule as returned to API callers.
#[derive(Debug, Clone)]
pub struct GeneratedSchedule {
    /// Raw final answer from the model
    pub schedule: String,
    /// Structured plan, when the answer contains one
    pub plan: Option<WeeklyPlan>,
    pub trace: AgentTrace,
}

/// Result of a schedule generation request; failures are carried, not raised.
#[derive(Debug)]
pub struct ScheduleOutcome {
    pub user_id: i32,
    pub week_start_date: NaiveDate,
    pub result: Result<GeneratedSchedule, AgentError>,
}

impl ScheduleOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Workout planning agent with injected model and store handles.
#[derive(Clone)]
pub struct ScheduleAgent {
    llm: Arc<dyn LlmClient>,
    tools: ToolSet,
    definitions: Arc<[ToolDefinition]>,
    settings: AgentSettings,
}

impl ScheduleAgent {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        store: Arc<dyn WorkoutStore>,
        settings: AgentSettings,
    ) -> Self {
        Self {
            llm,
            tools: ToolSet::new(store),
            definitions: ToolSet::definitions().into(),
            settings,
        }
    }

    /// Build an agent backed by the Anthropic API.
    pub fn from_config(config: &Config, store: Arc<dyn WorkoutStore>) -> Self {
        let llm = Arc::new(AnthropicClient::new(
            config.anthropic_base_url.clone(),
            config.anthropic_api_key.clone(),
        ));
        Self::new(llm, store, AgentSettings::from(config))
    }

    pub fn settings(&self) -> &AgentSettings {
        &self.settings
    }

    /// Run the tool loop for a task until the model gives a final answer.
    pub async fn run(&self, task: &str) -> Result<AgentRun, AgentError> {
        let mut messages = vec![Message::user_text(task)];
        let mut trace = AgentTrace::default();
        let mut decisions = 0;
        let mut state = AgentState::AwaitingDecision;

        loop {
            state = match state {
                AgentState::AwaitingDecision => {
                    if decisions == self.settings.max_steps {
                        tracing::warn!(
                            max_steps = self.settings.max_steps,
                            tools_called = trace.steps.len(),
                            "Agent step limit reached"
                        );
                        return Err(AgentError::StepLimitExceeded(self.settings.max_steps));
                    }
                    decisions += 1;
                    tracing::debug!(decision = decisions, "Agent awaiting decision");

                    let request = CompletionRequest {
                        model: &self.settings.model,
                        max_tokens: self.settings.max_tokens,
                        system: SYSTEM_PROMPT,
                        messages: &messages,
                        tools: &self.definitions,
                    };
                    let completion = self.llm.complete(&request).await?;

                    let calls = completion.tool_calls();
                    let text = completion.text();
                    messages.push(Message::assistant(completion.into_history_content()));

                    if !calls.is_empty() {
                        AgentState::ExecutingTools(calls)
                    } else if text.trim().is_empty() {
                        return Err(AgentError::EmptyResponse);
                    } else {
                        AgentState::Terminal(text)
                    }
                }
                AgentState::ExecutingTools(calls) => {
                    let mut results = Vec::with_capacity(calls.len());
                    for call in calls {
                        tracing::info!(tool = %call.name, args = %call.input, "Calling tool");
                        let outcome = self.tools.execute(&call.name, &call.input).await;

                        results.push(ContentBlock::ToolResult {
                            tool_use_id: call.id,
                            content: outcome.to_observation(),
                            is_error: outcome.is_failure(),
                        });
                        trace.steps.push(TraceStep {
                            tool: call.name,
                            input: call.input,
                            failed: outcome.is_failure(),
                        });
                    }
                    messages.push(Message::tool_results(results));
                    AgentState::AwaitingDecision
                }
                AgentState::Terminal(output) => {
                    tracing::info!(
                        decisions,
                        tools = ?trace.tools_called(),
                        "Agent finished"
                    );
                    return Ok(AgentRun {
                        output,
                        decisions,
                        trace,
                    });
                }
            };
        }
    }

    /// Generate and save a weekly schedule for a user.
    ///
    /// When `week_start` is omitted the next Monday after today is used.
    pub async fn generate_weekly_schedule(
        &self,
        user_id: i32,
        week_start: Option<NaiveDate>,
    ) -> ScheduleOutcome {
        let week_start_date =
            week_start.unwrap_or_else(|| next_monday(Utc::now().date_naive()));
        let prompt = build_task_prompt(user_id, week_start_date);

        tracing::info!(user_id, week_start = %week_start_date, "Generating weekly schedule");

        let result = self.run(&prompt).await.map(|run| GeneratedSchedule {
            plan: WeeklyPlan::from_agent_output(&run.output),
            schedule: run.output,
            trace: run.trace,
        });

        if let Err(e) = &result {
            tracing::error!(user_id, error = %e, "Schedule generation failed");
        }

        ScheduleOutcome {
            user_id,
            week_start_date,
            result,
        }
    }
}
