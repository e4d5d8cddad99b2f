// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for week-start dates.

use chrono::{Datelike, Days, NaiveDate};

/// Date format used for week starts in requests, prompts and tool arguments.
pub const WEEK_START_FORMAT: &str = "%Y-%m-%d";

/// The first Monday strictly after `today`.
///
/// On a Monday this is the Monday one week later.
pub fn next_monday(today: NaiveDate) -> NaiveDate {
    let days_ahead = 7 - u64::from(today.weekday().num_days_from_monday());
    today + Days::new(days_ahead)
}

/// Parse a `YYYY-MM-DD` week start.
pub fn parse_week_start(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(raw.trim(), WEEK_START_FORMAT)
}
