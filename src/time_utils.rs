// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, Utc};

/// Current Unix time in seconds.
pub fn now_epoch_secs() -> i64 {
    Utc::now().timestamp()
}

/// Render an RFC3339 timestamp the way an en-US `toLocaleString` does
/// (`3/5/2024, 2:07:09 PM`), in UTC.
///
/// Date-only values (`2024-03-05`) render as the date alone. Anything
/// unparsable is returned unchanged.
pub fn format_locale(timestamp: &str) -> String {
    if let Ok(date) = DateTime::parse_from_rfc3339(timestamp) {
        return date
            .with_timezone(&Utc)
            .format("%-m/%-d/%Y, %-I:%M:%S %p")
            .to_string();
    }

    if let Ok(date) = chrono::NaiveDate::parse_from_str(timestamp, "%Y-%m-%d") {
        return date.format("%-m/%-d/%Y").to_string();
    }

    timestamp.to_string()
}
