//! Completion-date prediction.
//!
//! Projects the remaining internship hours forward one calendar day at a time
//! over the weekly schedule, honoring the daily and weekly caps, and reports
//! the date on which the goal is met. When the goal is already met, the
//! completion date is recovered from the worked-log history instead.
//!
//! The engine is a pure function of its inputs: it holds no state across
//! calls and never fails outward. Anything unexpected becomes
//! [`Outcome::Unavailable`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::attendance::{AttendanceRecord, logged_dates};
use crate::dates::week_start;
use crate::schedule::WeekdaySet;
use crate::settings::Settings;

/// Days examined before a forecast is declared inconclusive (~5.5 years).
pub const DEFAULT_HORIZON_DAYS: u32 = 2000;
/// Daily pace assumed when no usable daily cap is configured.
pub const DEFAULT_DAILY_CAP: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPolicy {
    pub horizon_days: u32,
    pub default_daily_cap: f64,
}

impl Default for ForecastPolicy {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
            default_daily_cap: DEFAULT_DAILY_CAP,
        }
    }
}

impl ForecastPolicy {
    fn daily_cap_fallback(&self) -> f64 {
        if self.default_daily_cap.is_finite() && self.default_daily_cap > 0.0 {
            self.default_daily_cap
        } else {
            DEFAULT_DAILY_CAP
        }
    }
}

/// Where an already-reached completion date came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionSource {
    /// The worked logs reach the goal on this date.
    Logs,
    /// The caller's completed total says done but the logs never reach the
    /// goal; the date is "today".
    Assumed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    AlreadyComplete {
        on: NaiveDate,
        source: CompletionSource,
    },
    Forecast {
        on: NaiveDate,
    },
    /// No work days are scheduled (or the schedule is malformed).
    NoSchedule,
    /// The horizon ran out with hours still unassigned.
    Inconclusive {
        last_examined: NaiveDate,
        unscheduled_hours: f64,
    },
    /// Settings missing or the inputs could not be used.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub outcome: Outcome,
    /// `total_hours - hours_completed` while forecasting; 0 once complete.
    pub hours_remaining: f64,
    pub total_hours: f64,
    pub hours_completed: f64,
}

impl Prediction {
    pub fn unavailable() -> Self {
        Self {
            outcome: Outcome::Unavailable,
            hours_remaining: 0.0,
            total_hours: 0.0,
            hours_completed: 0.0,
        }
    }

    /// Nullable completion date.
    ///
    /// An inconclusive forecast still yields the last day examined, so callers
    /// that only want a date keep getting a best-effort one; check
    /// [`Prediction::outcome`] to tell the cases apart.
    pub fn estimated_completion_date(&self) -> Option<NaiveDate> {
        match self.outcome {
            Outcome::AlreadyComplete { on, .. } | Outcome::Forecast { on } => Some(on),
            Outcome::Inconclusive { last_examined, .. } => Some(last_examined),
            Outcome::NoSchedule | Outcome::Unavailable => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.outcome, Outcome::AlreadyComplete { .. })
    }
}

#[derive(Debug, Error)]
pub(crate) enum PredictionError {
    #[error("{0} is not a finite number")]
    NonFinite(&'static str),
    #[error("calendar overflow after {0}")]
    DateOverflow(NaiveDate),
    #[error("forecast horizon is zero days")]
    ZeroHorizon,
}

/// Predict the completion date with the default [`ForecastPolicy`].
///
/// `hours_completed` is trusted as the authoritative amount done so far (the
/// sum of worked hours). It should agree with `logs`; if it claims the goal is
/// met while the logs don't reach it, the result is
/// [`CompletionSource::Assumed`].
pub fn calculate_completion_date(
    settings: Option<&Settings>,
    logs: &[AttendanceRecord],
    hours_completed: f64,
    today: NaiveDate,
) -> Prediction {
    calculate_completion_date_with(&ForecastPolicy::default(), settings, logs, hours_completed, today)
}

pub fn calculate_completion_date_with(
    policy: &ForecastPolicy,
    settings: Option<&Settings>,
    logs: &[AttendanceRecord],
    hours_completed: f64,
    today: NaiveDate,
) -> Prediction {
    let Some(settings) = settings else {
        return Prediction::unavailable();
    };

    match predict(policy, settings, logs, hours_completed, today) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "completion prediction failed");
            Prediction::unavailable()
        }
    }
}

fn predict(
    policy: &ForecastPolicy,
    settings: &Settings,
    logs: &[AttendanceRecord],
    hours_completed: f64,
    today: NaiveDate,
) -> Result<Prediction, PredictionError> {
    let total = settings.total_hours_required;
    if !total.is_finite() {
        return Err(PredictionError::NonFinite("total_hours_required"));
    }
    if !hours_completed.is_finite() {
        return Err(PredictionError::NonFinite("hours_completed"));
    }

    let hours_remaining = total - hours_completed;
    let with_outcome = |outcome, hours_remaining| Prediction {
        outcome,
        hours_remaining,
        total_hours: total,
        hours_completed,
    };

    if hours_remaining <= 0.0 {
        let (on, source) = completion_from_history(logs, total, today);
        if source == CompletionSource::Assumed {
            warn!(
                total,
                hours_completed, "worked logs never reach the goal; assuming completion today"
            );
        }
        return Ok(with_outcome(Outcome::AlreadyComplete { on, source }, 0.0));
    }

    let schedule = match settings.schedule() {
        Ok(s) if !s.is_empty() => s,
        Ok(_) => return Ok(with_outcome(Outcome::NoSchedule, hours_remaining)),
        Err(e) => {
            warn!(error = %e, "ignoring malformed weekly schedule");
            return Ok(with_outcome(Outcome::NoSchedule, hours_remaining));
        }
    };

    if policy.horizon_days == 0 {
        return Err(PredictionError::ZeroHorizon);
    }

    let run = project(policy, settings, schedule, logs, hours_remaining, today)?;
    debug!(
        examined = run.days_examined,
        remaining = run.unscheduled,
        last = %run.last_examined,
        "forecast finished"
    );

    let outcome = if run.unscheduled > 0.0 {
        warn!(
            horizon_days = policy.horizon_days,
            unscheduled_hours = run.unscheduled,
            "forecast did not converge within the horizon"
        );
        Outcome::Inconclusive {
            last_examined: run.last_examined,
            unscheduled_hours: run.unscheduled,
        }
    } else {
        Outcome::Forecast {
            on: run.last_examined,
        }
    };

    Ok(with_outcome(outcome, hours_remaining))
}

/// Hours placed on each future day by the forward walk.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Projection {
    /// Days that received hours, in calendar order.
    pub(crate) assigned: Vec<(NaiveDate, f64)>,
    pub(crate) last_examined: NaiveDate,
    pub(crate) days_examined: u32,
    pub(crate) unscheduled: f64,
}

/// Walk forward from tomorrow, one day at a time, until `hours_remaining`
/// is placed or the horizon runs out. `policy.horizon_days` must be > 0.
pub(crate) fn project(
    policy: &ForecastPolicy,
    settings: &Settings,
    schedule: WeekdaySet,
    logs: &[AttendanceRecord],
    hours_remaining: f64,
    today: NaiveDate,
) -> Result<Projection, PredictionError> {
    let logged = logged_dates(logs);
    let daily_cap = settings
        .daily_limit()
        .unwrap_or_else(|| policy.daily_cap_fallback());
    let weekly_cap = settings.weekly_limit().unwrap_or(f64::INFINITY);

    // Seed the weekly budget with what this week has already used, so a
    // forecast starting mid-week doesn't overbook it.
    let mut running_week = week_start(today);
    let mut weekly_hours: f64 = logs
        .iter()
        .filter(|l| l.is_worked() && l.date >= running_week && l.date <= today)
        .map(|l| l.hours_worked)
        .sum();

    let mut cursor = next_day(today)?;
    let mut remaining = hours_remaining;
    let mut examined = 0u32;
    let mut assigned = Vec::new();

    while remaining > 0.0 && examined < policy.horizon_days {
        examined += 1;

        let week = week_start(cursor);
        if week != running_week {
            weekly_hours = 0.0;
            running_week = week;
        }

        if schedule.contains(cursor) && !logged.contains(&cursor) {
            let hours = daily_cap
                .min((weekly_cap - weekly_hours).max(0.0))
                .min(remaining);
            if hours > 0.0 {
                remaining -= hours;
                weekly_hours += hours;
                assigned.push((cursor, hours));
            }
        }

        cursor = next_day(cursor)?;
    }

    // The cursor sits one past the last day examined.
    let last_examined = cursor
        .pred_opt()
        .ok_or(PredictionError::DateOverflow(cursor))?;

    Ok(Projection {
        assigned,
        last_examined,
        days_examined: examined,
        unscheduled: remaining,
    })
}

/// First worked date, in chronological order, at which the running total
/// reaches `total`.
fn completion_from_history(
    logs: &[AttendanceRecord],
    total: f64,
    today: NaiveDate,
) -> (NaiveDate, CompletionSource) {
    let mut worked: Vec<&AttendanceRecord> = logs.iter().filter(|l| l.is_worked()).collect();
    worked.sort_by_key(|l| l.date);

    let mut cumulative = 0.0;
    for log in worked {
        cumulative += log.hours_worked;
        if cumulative >= total {
            return (log.date, CompletionSource::Logs);
        }
    }

    (today, CompletionSource::Assumed)
}

fn next_day(date: NaiveDate) -> Result<NaiveDate, PredictionError> {
    date.succ_opt().ok_or(PredictionError::DateOverflow(date))
}
