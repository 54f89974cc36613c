use chrono::{Days, NaiveDate};
use ojtally_core::{AttendanceRecord, Outcome, Settings, calculate_completion_date, weekday_index};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A spread of "today" values covering every weekday and a year boundary.
fn todays() -> Vec<NaiveDate> {
    let mut out: Vec<NaiveDate> = ymd(2024, 1, 7).iter_days().take(7).collect();
    out.push(ymd(2024, 12, 31));
    out.push(ymd(2024, 2, 28));
    out
}

fn forecast_date(settings: &Settings, logs: &[AttendanceRecord], done: f64, today: NaiveDate) -> NaiveDate {
    match calculate_completion_date(Some(settings), logs, done, today).outcome {
        Outcome::Forecast { on } => on,
        other => panic!("expected a forecast, got {other:?}"),
    }
}

#[test]
fn no_logs_reports_full_requirement() {
    for total in [1.0, 40.0, 486.0, 600.5] {
        let s = Settings::new(total).with_schedule(&[1, 3, 5]);
        let p = calculate_completion_date(Some(&s), &[], 0.0, ymd(2024, 5, 1));
        assert_eq!(p.hours_remaining, total);
        assert_eq!(p.hours_completed, 0.0);
        assert_eq!(p.total_hours, total);
    }
}

#[test]
fn forecast_lands_on_the_twentieth_weekday() {
    let s = Settings::new(160.0)
        .with_daily_cap(8.0)
        .with_weekly_cap(40.0)
        .with_schedule(&[1, 2, 3, 4, 5]);

    for today in todays() {
        let expected = today
            .iter_days()
            .skip(1)
            .filter(|d| (1..=5).contains(&weekday_index(*d)))
            .nth(19)
            .unwrap();
        assert_eq!(forecast_date(&s, &[], 0.0, today), expected, "today={today}");
    }
}

#[test]
fn raising_daily_cap_never_delays_completion() {
    for today in todays() {
        let mut previous: Option<NaiveDate> = None;
        for cap in 1..=12 {
            let s = Settings::new(300.0)
                .with_daily_cap(cap as f64)
                .with_weekly_cap(36.0)
                .with_schedule(&[1, 2, 4, 6]);
            let logs = vec![AttendanceRecord::excluded(today + Days::new(3))];
            let date = forecast_date(&s, &logs, 0.0, today);
            if let Some(prev) = previous {
                assert!(date <= prev, "cap={cap} today={today}: {date} > {prev}");
            }
            previous = Some(date);
        }
    }
}

#[test]
fn identical_inputs_give_identical_results() {
    let s = Settings::new(250.0)
        .with_daily_cap(7.5)
        .with_weekly_cap(30.0)
        .with_schedule(&[1, 2, 3, 4, 5]);
    let logs = vec![
        AttendanceRecord::worked(ymd(2024, 3, 4), 7.5),
        AttendanceRecord::excluded(ymd(2024, 3, 5)),
        AttendanceRecord::worked(ymd(2024, 3, 6), 6.0),
    ];
    let snapshot = logs.clone();
    let a = calculate_completion_date(Some(&s), &logs, 13.5, ymd(2024, 3, 6));
    let b = calculate_completion_date(Some(&s), &logs, 13.5, ymd(2024, 3, 6));
    assert_eq!(a, b);
    assert_eq!(logs, snapshot);
}
