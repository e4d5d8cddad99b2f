// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Populate the workout catalog.
//!
//! Uses the same database settings as the API server. Does nothing when the
//! catalog already has entries.

use workout_planner::{config::Config, db::PostgresDb, services::WORKOUT_CATALOG};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let db = PostgresDb::connect(&config).await?;

    let inserted = db.seed_workouts(WORKOUT_CATALOG).await?;
    if inserted > 0 {
        println!("Seeded {} workouts", inserted);
    } else {
        println!("Workouts table already populated; nothing to do");
    }
    Ok(())
}
