//! Checking a single day's entry against the configured caps before it is stored.

use chrono::NaiveDate;
use regex::Regex;
use thiserror::Error;

use crate::attendance::{AttendanceRecord, hours_in_week, worked_hours};
use crate::settings::Settings;

/// Hard ceiling for a single day.
pub const MAX_HOURS_PER_DAY: f64 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntryInput {
    Worked(f64),
    Excluded,
}

#[derive(Debug, Error)]
pub enum EntryError {
    #[error("the hour requirement is already met; attendance is read-only")]
    GoalComplete,
    #[error("invalid hours '{0}'")]
    InvalidHours(String),
    #[error("hours worked cannot exceed 24 per day (got {0})")]
    ExceedsDay(f64),
    #[error("daily limit is {limit} hours; entered {entered}")]
    DailyLimit { limit: f64, entered: f64 },
    #[error(
        "weekly limit is {limit} hours; {logged} already logged this week, at most {available:.1} more"
    )]
    WeeklyLimit { limit: f64, logged: f64, available: f64 },
    #[error("hours pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Read free-form hours text such as "7,5" or "8 hrs".
///
/// Commas become decimal points and everything except digits and dots is
/// dropped; the leading number that remains is the value.
pub fn parse_hours_input(input: &str) -> Result<f64, EntryError> {
    let noise = Regex::new(r"[^0-9.]")?;
    let leading_number = Regex::new(r"^(\d+\.?\d*|\.\d+)")?;

    let normalized = input.replace(',', ".");
    let sanitized = noise.replace_all(&normalized, "");

    leading_number
        .find(&sanitized)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|h| h.is_finite() && *h >= 0.0)
        .ok_or_else(|| EntryError::InvalidHours(input.to_string()))
}

/// Validate an entry for `date` and build the record that would be stored.
///
/// `logs` is the existing history; a record already on `date` is treated as
/// being replaced, so it doesn't count against the weekly budget.
pub fn validate_entry(
    settings: &Settings,
    logs: &[AttendanceRecord],
    date: NaiveDate,
    input: EntryInput,
) -> Result<AttendanceRecord, EntryError> {
    let total = settings.total_hours_required;
    if total > 0.0 && worked_hours(logs) >= total {
        return Err(EntryError::GoalComplete);
    }

    let hours = match input {
        EntryInput::Excluded => return Ok(AttendanceRecord::excluded(date)),
        EntryInput::Worked(h) => h,
    };

    if !hours.is_finite() || hours < 0.0 {
        return Err(EntryError::InvalidHours(hours.to_string()));
    }
    if hours > MAX_HOURS_PER_DAY {
        return Err(EntryError::ExceedsDay(hours));
    }

    if let Some(limit) = settings.daily_limit() {
        if hours > limit {
            return Err(EntryError::DailyLimit {
                limit,
                entered: hours,
            });
        }
    }

    if let Some(limit) = settings.weekly_limit() {
        let logged = hours_in_week(logs, date, true);
        if logged + hours > limit {
            return Err(EntryError::WeeklyLimit {
                limit,
                logged,
                available: (limit - logged).max(0.0),
            });
        }
    }

    Ok(AttendanceRecord::worked(date, hours))
}
