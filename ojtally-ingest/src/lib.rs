//! ojtally-ingest: loads the settings + attendance snapshot the prediction
//! engine consumes, from JSON snapshots and CSV attendance exports.

pub mod attendance_csv;
pub mod snapshot;

pub use attendance_csv::{parse_attendance_csv, read_attendance_csv};
pub use snapshot::{Snapshot, load_snapshot, parse_snapshot};
