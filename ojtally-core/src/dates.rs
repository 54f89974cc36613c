//! Date utilities: Sunday-aligned weeks and the canonical `YYYY-MM-DD` key.
//!
//! Attendance dates are plain calendar dates recorded in the intern's local
//! calendar, so everything here works on `NaiveDate` and never touches a
//! timezone.

use chrono::{Datelike, Days, NaiveDate};
use thiserror::Error;

/// Canonical on-disk and display format for attendance dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    Malformed(String),
    #[error("no such calendar date: {0}")]
    OutOfRange(String),
}

/// The Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_sunday();
    date.checked_sub_days(Days::new(offset.into()))
        .unwrap_or(date)
}

/// Weekday index with 0 = Sunday … 6 = Saturday.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse `YYYY-MM-DD` by its components.
///
/// Single-digit month/day components are accepted ("2024-1-5").
pub fn parse_date(s: &str) -> Result<NaiveDate, DateError> {
    let s = s.trim();
    let mut parts = s.split('-');
    let (Some(y), Some(m), Some(d), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(DateError::Malformed(s.to_string()));
    };

    let year: i32 = y.parse().map_err(|_| DateError::Malformed(s.to_string()))?;
    let month: u32 = m.parse().map_err(|_| DateError::Malformed(s.to_string()))?;
    let day: u32 = d.parse().map_err(|_| DateError::Malformed(s.to_string()))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| DateError::OutOfRange(s.to_string()))
}

/// Serde adapter storing dates as `YYYY-MM-DD` through [`format_date`] / [`parse_date`].
pub mod serde_ymd {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_date(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_start_is_previous_sunday() {
        // 2024-01-10 is a Wednesday
        assert_eq!(week_start(ymd(2024, 1, 10)), ymd(2024, 1, 7));
        // Saturday belongs to the week that started six days earlier
        assert_eq!(week_start(ymd(2024, 1, 13)), ymd(2024, 1, 7));
    }

    #[test]
    fn test_week_start_of_sunday_is_itself() {
        assert_eq!(week_start(ymd(2024, 1, 14)), ymd(2024, 1, 14));
    }

    #[test]
    fn test_week_start_crosses_month_and_year() {
        // 2025-01-01 is a Wednesday
        assert_eq!(week_start(ymd(2025, 1, 1)), ymd(2024, 12, 29));
    }

    #[test]
    fn test_weekday_index() {
        assert_eq!(weekday_index(ymd(2024, 1, 7)), 0);
        assert_eq!(weekday_index(ymd(2024, 1, 8)), 1);
        assert_eq!(weekday_index(ymd(2024, 1, 13)), 6);
    }

    #[test]
    fn test_format_pads_components() {
        assert_eq!(format_date(ymd(2024, 3, 5)), "2024-03-05");
    }

    #[test]
    fn test_parse_accepts_canonical_and_unpadded() {
        assert_eq!(parse_date("2024-01-15").unwrap(), ymd(2024, 1, 15));
        assert_eq!(parse_date("2024-1-5").unwrap(), ymd(2024, 1, 5));
        assert_eq!(parse_date(" 2024-02-29 ").unwrap(), ymd(2024, 2, 29));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse_date("2024/01/15"), Err(DateError::Malformed(_))));
        assert!(matches!(parse_date("2024-01-15T00:00:00"), Err(DateError::Malformed(_))));
        assert!(matches!(parse_date("2024-01"), Err(DateError::Malformed(_))));
        assert!(matches!(parse_date("2023-02-29"), Err(DateError::OutOfRange(_))));
    }
}
