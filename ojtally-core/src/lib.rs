//! ojtally-core: internship hour tracking and completion-date prediction.

pub mod attendance;
pub mod dates;
pub mod entry;
pub mod prediction;
pub mod progress;
pub mod schedule;
pub mod settings;

pub use attendance::{
    AttendanceRecord, AttendanceStatus, hours_in_week, logged_dates, valid_hours, worked_hours,
};
pub use dates::{DateError, format_date, parse_date, week_start, weekday_index};
pub use entry::{EntryError, EntryInput, parse_hours_input, validate_entry};
pub use prediction::{
    CompletionSource, ForecastPolicy, Outcome, Prediction, calculate_completion_date,
    calculate_completion_date_with,
};
pub use progress::ProgressSummary;
pub use schedule::{ScheduleError, WeekdaySet, upcoming_scheduled_days};
pub use settings::Settings;
