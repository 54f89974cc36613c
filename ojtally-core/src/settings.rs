//! Internship settings as consumed by the prediction engine.

use serde::{Deserialize, Deserializer, Serialize};

use crate::schedule::{ScheduleError, WeekdaySet};

/// Per-profile internship settings.
///
/// Field names follow the storage schema. Caps of `None`, zero, negative or
/// non-finite values are treated as unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub total_hours_required: f64,
    #[serde(default)]
    pub max_hours_per_day: Option<f64>,
    #[serde(default)]
    pub max_hours_per_week: Option<f64>,
    #[serde(default)]
    pub unlimited_weekly: bool,
    /// Weekday indices, 0 = Sunday. Accepts a JSON array or the JSON-encoded
    /// string the storage column holds (`"[1,2,3,4,5]"`).
    #[serde(default, deserialize_with = "deserialize_schedule")]
    pub weekly_schedule: Vec<i64>,
}

impl Settings {
    pub fn new(total_hours_required: f64) -> Self {
        Self {
            total_hours_required,
            max_hours_per_day: None,
            max_hours_per_week: None,
            unlimited_weekly: false,
            weekly_schedule: Vec::new(),
        }
    }

    pub fn with_daily_cap(mut self, hours: f64) -> Self {
        self.max_hours_per_day = Some(hours);
        self
    }

    pub fn with_weekly_cap(mut self, hours: f64) -> Self {
        self.max_hours_per_week = Some(hours);
        self.unlimited_weekly = false;
        self
    }

    pub fn with_unlimited_weekly(mut self) -> Self {
        self.unlimited_weekly = true;
        self
    }

    pub fn with_schedule(mut self, indices: &[i64]) -> Self {
        self.weekly_schedule = indices.to_vec();
        self
    }

    /// Validated weekly schedule.
    pub fn schedule(&self) -> Result<WeekdaySet, ScheduleError> {
        WeekdaySet::from_indices(&self.weekly_schedule)
    }

    /// The configured daily cap, if it is a finite positive number.
    pub fn daily_limit(&self) -> Option<f64> {
        self.max_hours_per_day.filter(|h| usable_cap(*h))
    }

    /// The configured weekly cap; `None` when unlimited or unset.
    pub fn weekly_limit(&self) -> Option<f64> {
        if self.unlimited_weekly {
            return None;
        }
        self.max_hours_per_week.filter(|h| usable_cap(*h))
    }
}

fn usable_cap(hours: f64) -> bool {
    hours.is_finite() && hours > 0.0
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSchedule {
    List(Vec<i64>),
    Encoded(String),
    Null(()),
}

fn deserialize_schedule<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<i64>, D::Error> {
    match RawSchedule::deserialize(deserializer)? {
        RawSchedule::List(v) => Ok(v),
        RawSchedule::Null(()) => Ok(Vec::new()),
        RawSchedule::Encoded(s) if s.trim().is_empty() => Ok(Vec::new()),
        RawSchedule::Encoded(s) => serde_json::from_str(&s)
            .map_err(|e| serde::de::Error::custom(format!("weekly_schedule '{s}': {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caps_ignore_unusable_values() {
        let s = Settings::new(100.0).with_daily_cap(0.0).with_weekly_cap(-5.0);
        assert_eq!(s.daily_limit(), None);
        assert_eq!(s.weekly_limit(), None);

        let s = Settings::new(100.0).with_daily_cap(f64::NAN);
        assert_eq!(s.daily_limit(), None);

        let s = Settings::new(100.0).with_daily_cap(6.5).with_weekly_cap(30.0);
        assert_eq!(s.daily_limit(), Some(6.5));
        assert_eq!(s.weekly_limit(), Some(30.0));
    }

    #[test]
    fn test_unlimited_weekly_wins_over_cap() {
        let s = Settings::new(100.0).with_weekly_cap(30.0).with_unlimited_weekly();
        assert_eq!(s.weekly_limit(), None);
    }

    #[test]
    fn test_deserialize_schedule_from_array() {
        let s: Settings = serde_json::from_str(
            r#"{"total_hours_required": 486, "max_hours_per_day": 8, "weekly_schedule": [1,2,3]}"#,
        )
        .unwrap();
        assert_eq!(s.weekly_schedule, vec![1, 2, 3]);
        assert_eq!(s.max_hours_per_week, None);
        assert!(!s.unlimited_weekly);
    }

    #[test]
    fn test_deserialize_schedule_from_encoded_string() {
        let s: Settings = serde_json::from_str(
            r#"{"total_hours_required": 486, "weekly_schedule": "[1,2,3,4,5]", "unlimited_weekly": true}"#,
        )
        .unwrap();
        assert_eq!(s.weekly_schedule, vec![1, 2, 3, 4, 5]);
        assert!(s.unlimited_weekly);
    }

    #[test]
    fn test_deserialize_schedule_empty_forms() {
        for raw in [r#""""#, "null", "[]"] {
            let json = format!(r#"{{"total_hours_required": 1, "weekly_schedule": {raw}}}"#);
            let s: Settings = serde_json::from_str(&json).unwrap();
            assert!(s.weekly_schedule.is_empty(), "raw={raw}");
        }
    }

    #[test]
    fn test_deserialize_schedule_bad_string_errors() {
        let err = serde_json::from_str::<Settings>(
            r#"{"total_hours_required": 1, "weekly_schedule": "mon,tue"}"#,
        );
        assert!(err.is_err());
    }
}
