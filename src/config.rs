// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use sqlx::postgres::PgConnectOptions;
use std::env;
use std::str::FromStr;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Database ---
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    /// Upper bound on pooled connections
    pub db_max_connections: u32,

    // --- Language model ---
    /// Anthropic API key
    pub anthropic_api_key: String,
    /// Base URL of the Messages API (overridable for local testing)
    pub anthropic_base_url: String,
    /// Model identifier used for schedule generation
    pub agent_model: String,
    /// Max output tokens per model call
    pub agent_max_tokens: u32,
    /// Max model decisions per agent run
    pub agent_max_steps: usize,

    /// Server port
    pub port: u16,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            db_host: "localhost".to_string(),
            db_port: 5432,
            db_user: "postgres".to_string(),
            db_password: "postgres".to_string(),
            db_name: "workouts_test".to_string(),
            db_max_connections: 5,
            anthropic_api_key: "test_api_key".to_string(),
            anthropic_base_url: DEFAULT_ANTHROPIC_BASE_URL.to_string(),
            agent_model: DEFAULT_AGENT_MODEL.to_string(),
            agent_max_tokens: 2048,
            agent_max_steps: 10,
            port: 8000,
        }
    }
}

const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_AGENT_MODEL: &str = "claude-sonnet-4-20250514";

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honoured for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            db_host: required("DB_HOST")?,
            db_port: parsed_or("DB_PORT", 5432)?,
            db_user: required("DB_USER")?,
            db_password: required("DB_PASSWORD")?,
            db_name: required("DB_NAME")?,
            db_max_connections: parsed_or("DB_MAX_CONNECTIONS", 5)?,

            anthropic_api_key: required("ANTHROPIC_API_KEY").map(|v| v.trim().to_string())?,
            anthropic_base_url: env::var("ANTHROPIC_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_ANTHROPIC_BASE_URL.to_string()),
            agent_model: env::var("AGENT_MODEL")
                .unwrap_or_else(|_| DEFAULT_AGENT_MODEL.to_string()),
            agent_max_tokens: parsed_or("AGENT_MAX_TOKENS", 2048)?,
            agent_max_steps: parsed_or("AGENT_MAX_STEPS", 10)?,

            port: parsed_or("PORT", 8000)?,
        })
    }

    /// Connection options for the PostgreSQL pool.
    pub fn pg_connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .password(&self.db_password)
            .database(&self.db_name)
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn parsed_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            value: raw.clone(),
        }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}
