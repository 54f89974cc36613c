//! Attendance history: one record per calendar date.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::dates::{serde_ymd, week_start};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    /// Hours logged; counts toward the goal.
    Worked,
    /// Holiday, leave, or otherwise not attended. The date is still taken.
    Excluded,
}

impl std::str::FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "worked" => Ok(AttendanceStatus::Worked),
            "excluded" => Ok(AttendanceStatus::Excluded),
            other => Err(format!("unknown attendance status: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(with = "serde_ymd")]
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "deserialize_hours")]
    pub hours_worked: f64,
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    pub fn worked(date: NaiveDate, hours: f64) -> Self {
        Self {
            date,
            hours_worked: hours,
            status: AttendanceStatus::Worked,
        }
    }

    pub fn excluded(date: NaiveDate) -> Self {
        Self {
            date,
            hours_worked: 0.0,
            status: AttendanceStatus::Excluded,
        }
    }

    pub fn is_worked(&self) -> bool {
        self.status == AttendanceStatus::Worked
    }
}

/// Logged hours must be a finite, non-negative number.
pub fn valid_hours(hours: f64) -> bool {
    hours.is_finite() && hours >= 0.0
}

fn deserialize_hours<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let hours = f64::deserialize(deserializer)?;
    if valid_hours(hours) {
        Ok(hours)
    } else {
        Err(de::Error::custom(format!(
            "hours_worked must be non-negative, got {hours}"
        )))
    }
}

/// Total hours over worked records.
pub fn worked_hours(logs: &[AttendanceRecord]) -> f64 {
    logs.iter()
        .filter(|l| l.is_worked())
        .map(|l| l.hours_worked)
        .sum()
}

/// Worked hours in the Sunday-aligned week containing `date`.
///
/// With `exclude_date`, the record on `date` itself is left out, which gives
/// the budget already used by the rest of the week when editing that day.
pub fn hours_in_week(logs: &[AttendanceRecord], date: NaiveDate, exclude_date: bool) -> f64 {
    let week = week_start(date);
    logs.iter()
        .filter(|l| l.is_worked() && week_start(l.date) == week)
        .filter(|l| !(exclude_date && l.date == date))
        .map(|l| l.hours_worked)
        .sum()
}

/// Dates that already have a record, worked or excluded.
pub fn logged_dates(logs: &[AttendanceRecord]) -> HashSet<NaiveDate> {
    logs.iter().map(|l| l.date).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<AttendanceRecord> {
        vec![
            AttendanceRecord::worked(ymd(2024, 1, 5), 8.0),  // previous week (Fri)
            AttendanceRecord::worked(ymd(2024, 1, 8), 7.5),  // Mon
            AttendanceRecord::excluded(ymd(2024, 1, 9)),     // Tue
            AttendanceRecord::worked(ymd(2024, 1, 10), 6.0), // Wed
        ]
    }

    #[test]
    fn test_worked_hours_ignores_excluded() {
        assert_eq!(worked_hours(&sample()), 21.5);
        assert_eq!(worked_hours(&[]), 0.0);
    }

    #[test]
    fn test_hours_in_week() {
        let logs = sample();
        assert_eq!(hours_in_week(&logs, ymd(2024, 1, 12), false), 13.5);
        assert_eq!(hours_in_week(&logs, ymd(2024, 1, 10), true), 7.5);
        assert_eq!(hours_in_week(&logs, ymd(2024, 1, 3), false), 8.0);
    }

    #[test]
    fn test_logged_dates_include_excluded() {
        let dates = logged_dates(&sample());
        assert_eq!(dates.len(), 4);
        assert!(dates.contains(&ymd(2024, 1, 9)));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("Worked".parse::<AttendanceStatus>(), Ok(AttendanceStatus::Worked));
        assert_eq!(" excluded ".parse::<AttendanceStatus>(), Ok(AttendanceStatus::Excluded));
        assert!("absent".parse::<AttendanceStatus>().is_err());
    }

    #[test]
    fn test_record_json_shape() {
        let rec = AttendanceRecord::worked(ymd(2024, 1, 15), 8.0);
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["date"], "2024-01-15");
        assert_eq!(json["status"], "worked");

        let back: AttendanceRecord =
            serde_json::from_str(r#"{"date":"2024-01-16","status":"excluded"}"#).unwrap();
        assert_eq!(back, AttendanceRecord::excluded(ymd(2024, 1, 16)));
    }

    #[test]
    fn test_record_rejects_negative_hours() {
        let err = serde_json::from_str::<AttendanceRecord>(
            r#"{"date":"2024-01-16","hours_worked":-5,"status":"worked"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("non-negative"));

        assert!(valid_hours(0.0));
        assert!(valid_hours(7.5));
        assert!(!valid_hours(-0.5));
        assert!(!valid_hours(f64::NAN));
        assert!(!valid_hours(f64::INFINITY));
    }
}
