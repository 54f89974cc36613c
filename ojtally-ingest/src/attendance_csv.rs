//! Parse attendance CSV exports into typed records.
//!
//! Expected header (column order is free, extra columns are ignored):
//! date,hours_worked,status

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use ojtally_core::{AttendanceRecord, AttendanceStatus, parse_date, valid_hours};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

/// Parse an attendance CSV file.
pub fn read_attendance_csv(path: impl AsRef<Path>) -> Result<Vec<AttendanceRecord>> {
    let file = std::fs::File::open(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;
    parse_attendance_csv(file).with_context(|| format!("parsing {}", path.as_ref().display()))
}

/// Parse attendance rows from any reader.
///
/// Rows whose date, status or worked hours can't be read are skipped;
/// negative hours count as unreadable. A second row for a
/// date already seen is an error: there is at most one record per day.
pub fn parse_attendance_csv<R: Read>(reader: R) -> Result<Vec<AttendanceRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().context("reading header row")?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .with_context(|| format!("missing '{name}' column"))
    };
    let date_col = column("date")?;
    let hours_col = column("hours_worked")?;
    let status_col = column("status")?;

    let mut seen: HashSet<NaiveDate> = HashSet::new();
    let mut out = Vec::new();

    for (line, result) in rdr.records().enumerate() {
        let record = result?;

        let date = match parse_date(record.get(date_col).unwrap_or("")) {
            Ok(d) => d,
            Err(e) => {
                tracing::debug!(row = line + 2, error = %e, "skipping row");
                continue;
            }
        };
        let status = match record.get(status_col).unwrap_or("").parse::<AttendanceStatus>() {
            Ok(s) => s,
            Err(e) => {
                tracing::debug!(row = line + 2, error = %e, "skipping row");
                continue;
            }
        };

        let hours_worked = match status {
            AttendanceStatus::Excluded => 0.0,
            AttendanceStatus::Worked => {
                let raw = record.get(hours_col).unwrap_or("");
                match raw.parse::<f64>() {
                    Ok(h) if valid_hours(h) => h,
                    _ => {
                        tracing::debug!(row = line + 2, hours = raw, "skipping row with bad hours");
                        continue;
                    }
                }
            }
        };

        if !seen.insert(date) {
            bail!("duplicate attendance record for {date} (row {})", line + 2);
        }

        out.push(AttendanceRecord {
            date,
            hours_worked,
            status,
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parses_basic_rows() {
        let csv = "date,hours_worked,status\n2024-01-08,8,worked\n2024-01-09,0,excluded\n2024-01-10, 6.5 ,Worked\n";
        let logs = parse_attendance_csv(csv.as_bytes()).unwrap();
        assert_eq!(logs.len(), 3);
        assert_eq!(logs[0], AttendanceRecord::worked(ymd(2024, 1, 8), 8.0));
        assert_eq!(logs[1], AttendanceRecord::excluded(ymd(2024, 1, 9)));
        assert_eq!(logs[2].hours_worked, 6.5);
    }

    #[test]
    fn test_column_order_is_free() {
        let csv = "status,date,note,hours_worked\nworked,2024-01-08,kickoff,4\n";
        let logs = parse_attendance_csv(csv.as_bytes()).unwrap();
        assert_eq!(logs, vec![AttendanceRecord::worked(ymd(2024, 1, 8), 4.0)]);
    }

    #[test]
    fn test_skips_unreadable_rows() {
        let csv = "date,hours_worked,status\nnot-a-date,8,worked\n2024-01-09,8,absent\n2024-01-10,8,worked\n";
        let logs = parse_attendance_csv(csv.as_bytes()).unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].date, ymd(2024, 1, 10));
    }

    #[test]
    fn test_excluded_rows_carry_no_hours() {
        let csv = "date,hours_worked,status\n2024-01-09,8,excluded\n";
        let logs = parse_attendance_csv(csv.as_bytes()).unwrap();
        assert_eq!(logs[0].hours_worked, 0.0);
    }

    #[test]
    fn test_duplicate_date_is_an_error() {
        let csv = "date,hours_worked,status\n2024-01-08,8,worked\n2024-01-08,0,excluded\n";
        let err = parse_attendance_csv(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let csv = "date,hours\n2024-01-08,8\n";
        assert!(parse_attendance_csv(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_skips_rows_with_bad_hours() {
        let csv = "date,hours_worked,status\n2024-01-08,eight,worked\n2024-01-09,-5,worked\n2024-01-10,,worked\n2024-01-11,NaN,worked\n2024-01-12,8,worked\n";
        let logs = parse_attendance_csv(csv.as_bytes()).unwrap();
        assert_eq!(logs, vec![AttendanceRecord::worked(ymd(2024, 1, 12), 8.0)]);
    }

    #[test]
    fn test_excluded_rows_ignore_hours_column() {
        let csv = "date,hours_worked,status\n2024-01-09,,excluded\n";
        let logs = parse_attendance_csv(csv.as_bytes()).unwrap();
        assert_eq!(logs, vec![AttendanceRecord::excluded(ymd(2024, 1, 9))]);
    }
}
