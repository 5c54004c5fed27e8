//! Shared utilities for CLI commands.

use std::sync::LazyLock;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use dl_core::dates::{self, Unit};
use regex::Regex;
use serde_json::Value;

/// Pre-compiled regex for relative day parsing.
static RELATIVE_DAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(\d+)\s+(day|week)s?\s+ago|in\s+(\d+)\s+(day|week)s?)$").unwrap()
});

/// Conservative bound for relative day offsets (~1000 years).
const MAX_RELATIVE_DAYS: i64 = 1000 * 366;

/// Parse a day as either an ISO date or relative to `today`.
///
/// Supports:
/// - ISO 8601 date: "2025-01-15"
/// - Keywords: "today", "yesterday", "tomorrow"
/// - Relative: "3 days ago", "1 week ago", "in 2 days"
pub fn parse_day(s: &str, today: NaiveDate) -> anyhow::Result<NaiveDate> {
    let s = s.trim().to_ascii_lowercase();

    if let Ok(date) = NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
        return Ok(date);
    }

    let offset_days: i64 = match s.as_str() {
        "today" => 0,
        "yesterday" => -1,
        "tomorrow" => 1,
        _ => {
            let Some(caps) = RELATIVE_DAY_RE.captures(&s) else {
                anyhow::bail!(
                    "Invalid date: {s}. Use YYYY-MM-DD, today, yesterday, tomorrow, 'N days ago' or 'in N days'"
                );
            };
            let (amount, unit, sign) = match (caps.get(1), caps.get(3)) {
                (Some(n), _) => (n.as_str(), &caps[2], -1),
                (None, Some(n)) => (n.as_str(), &caps[4], 1),
                (None, None) => anyhow::bail!("Invalid date: {s}"),
            };
            let n: i64 = amount
                .parse()
                .context("failed to parse number in relative date")?;
            let days = if unit == "week" { n.saturating_mul(7) } else { n };
            if days > MAX_RELATIVE_DAYS {
                anyhow::bail!("Relative date too far away: {s}");
            }
            sign * days
        }
    };

    let midnight = today.and_time(chrono::NaiveTime::MIN);
    dates::add(midnight, offset_days, Unit::Day)
        .map(|dt| dt.date())
        .with_context(|| format!("date out of range: {s}"))
}

/// Read an event time from a JSON value.
///
/// Accepts RFC 3339 strings (the wall-clock time as written is kept),
/// naive `YYYY-MM-DDTHH:MM[:SS]` strings, and integer Unix milliseconds
/// (interpreted as UTC). Anything else yields `None`.
pub fn parse_event_time(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::String(s) => {
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.naive_local());
            }
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        }
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.naive_utc()),
        _ => None,
    }
}
