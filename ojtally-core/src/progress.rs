//! Progress toward the hour requirement.

use serde::{Deserialize, Serialize};

use crate::attendance::{AttendanceRecord, AttendanceStatus, worked_hours};
use crate::settings::Settings;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub total_hours: f64,
    pub hours_completed: f64,
    /// Never negative.
    pub hours_remaining: f64,
    /// 0-100.
    pub percent: f64,
    pub is_complete: bool,
    pub worked_days: usize,
    pub excluded_days: usize,
}

impl ProgressSummary {
    /// Summarize from the log history, deriving completed hours from worked records.
    pub fn from_logs(settings: Option<&Settings>, logs: &[AttendanceRecord]) -> Self {
        Self::new(settings, logs, worked_hours(logs))
    }

    /// Summarize with a caller-supplied completed total.
    pub fn new(settings: Option<&Settings>, logs: &[AttendanceRecord], hours_completed: f64) -> Self {
        let total_hours = settings.map(|s| s.total_hours_required).unwrap_or(0.0);
        let percent = if total_hours > 0.0 {
            (hours_completed / total_hours * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };

        let count = |status: AttendanceStatus| logs.iter().filter(|l| l.status == status).count();

        Self {
            total_hours,
            hours_completed,
            hours_remaining: (total_hours - hours_completed).max(0.0),
            percent,
            is_complete: total_hours > 0.0 && hours_completed >= total_hours,
            worked_days: count(AttendanceStatus::Worked),
            excluded_days: count(AttendanceStatus::Excluded),
        }
    }
}
