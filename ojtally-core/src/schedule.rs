//! Weekly work schedule: which weekdays work is expected on.

use std::collections::HashSet;

use chrono::{NaiveDate, Weekday};
use thiserror::Error;

use crate::attendance::AttendanceRecord;
use crate::dates::weekday_index;

/// How far ahead the dashboard marks scheduled days.
pub const DEFAULT_UPCOMING_DAYS: u32 = 90;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("weekday index {0} is outside 0..=6 (0 = Sunday)")]
    InvalidWeekday(i64),
}

/// Set of scheduled weekdays, bit `i` set for weekday index `i` (0 = Sunday).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const EMPTY: WeekdaySet = WeekdaySet(0);
    pub const MONDAY_TO_FRIDAY: WeekdaySet = WeekdaySet(0b0011_1110);
    pub const EVERY_DAY: WeekdaySet = WeekdaySet(0b0111_1111);

    /// Build from raw weekday indices. Order and duplicates don't matter.
    pub fn from_indices(indices: &[i64]) -> Result<Self, ScheduleError> {
        let mut bits = 0u8;
        for &idx in indices {
            if !(0..=6).contains(&idx) {
                return Err(ScheduleError::InvalidWeekday(idx));
            }
            bits |= 1 << idx;
        }
        Ok(Self(bits))
    }

    pub fn contains_index(&self, idx: u8) -> bool {
        idx < 7 && self.0 & (1 << idx) != 0
    }

    /// Whether `date` falls on a scheduled weekday.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.contains_index(weekday_index(date))
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Scheduled weekdays, Sunday first.
    pub fn weekdays(&self) -> impl Iterator<Item = Weekday> + '_ {
        (0u8..7)
            .filter(|i| self.contains_index(*i))
            .map(|i| match i {
                0 => Weekday::Sun,
                1 => Weekday::Mon,
                2 => Weekday::Tue,
                3 => Weekday::Wed,
                4 => Weekday::Thu,
                5 => Weekday::Fri,
                _ => Weekday::Sat,
            })
    }

    /// Indices in ascending order, the inverse of [`WeekdaySet::from_indices`].
    pub fn indices(&self) -> Vec<i64> {
        (0u8..7)
            .filter(|i| self.contains_index(*i))
            .map(i64::from)
            .collect()
    }
}

/// Scheduled dates in `[from, from + days]` that have no attendance record yet.
pub fn upcoming_scheduled_days(
    schedule: WeekdaySet,
    logs: &[AttendanceRecord],
    from: NaiveDate,
    days: u32,
) -> Vec<NaiveDate> {
    if schedule.is_empty() {
        return vec![];
    }

    let logged: HashSet<NaiveDate> = logs.iter().map(|l| l.date).collect();
    from.iter_days()
        .take(days as usize + 1)
        .filter(|d| schedule.contains(*d) && !logged.contains(d))
        .collect()
}
