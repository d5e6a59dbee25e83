// commands/mod.rs — Subcommand modules and shared parsing helpers.

pub mod activity;
pub mod deal;
pub mod roster;
pub mod sweep;
pub mod target;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

/// Parse a timestamp from RFC 3339 or a bare YYYY-MM-DD date
/// (interpreted as midnight UTC).
pub fn parse_timestamp(s: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("'{}' is not an RFC 3339 timestamp or YYYY-MM-DD date", s))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .context("date has no midnight representation")?;
    Ok(Utc.from_utc_datetime(&midnight))
}

/// Parse a UUID argument with a readable error.
pub fn parse_id(s: &str) -> anyhow::Result<Uuid> {
    Uuid::parse_str(s).with_context(|| format!("'{}' is not a valid ID", s))
}

/// Truncate a string for table display.
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() > max {
        format!("{}...", &s[..max - 3])
    } else {
        s.to_string()
    }
}
