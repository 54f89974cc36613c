//! Human-readable rendering of engine results.

use chrono::{Datelike, NaiveDate};
use ojtally_core::{CompletionSource, Outcome, Prediction, ProgressSummary, format_date};

fn dated(d: NaiveDate) -> String {
    format!("{} ({})", format_date(d), d.weekday())
}

pub fn render_prediction(p: &Prediction) -> String {
    let mut s = String::new();
    s.push_str(&format!("Total hours:  {:.1}\n", p.total_hours));
    s.push_str(&format!("Completed:    {:.1}\n", p.hours_completed));
    s.push_str(&format!("Remaining:    {:.1}\n\n", p.hours_remaining.max(0.0)));

    let line = match &p.outcome {
        Outcome::Forecast { on } => format!("Estimated completion: {}", dated(*on)),
        Outcome::AlreadyComplete {
            on,
            source: CompletionSource::Logs,
        } => format!("Completed on {}", dated(*on)),
        Outcome::AlreadyComplete {
            on,
            source: CompletionSource::Assumed,
        } => format!(
            "Completed (logs don't reach the goal; assuming {})",
            format_date(*on)
        ),
        Outcome::NoSchedule => {
            "No work days scheduled; set a weekly schedule to see a prediction".to_string()
        }
        Outcome::Inconclusive {
            last_examined,
            unscheduled_hours,
        } => format!(
            "No completion within the forecast horizon ({:.1}h still unscheduled by {})",
            unscheduled_hours,
            format_date(*last_examined)
        ),
        Outcome::Unavailable => "No settings; nothing to predict".to_string(),
    };
    s.push_str(&line);
    s.push('\n');
    s
}

pub fn render_progress(p: &ProgressSummary) -> String {
    const WIDTH: usize = 30;
    let filled = ((p.percent / 100.0) * WIDTH as f64).round() as usize;
    let bar = format!("[{}{}]", "#".repeat(filled), "-".repeat(WIDTH - filled.min(WIDTH)));

    let mut s = String::new();
    s.push_str(&format!("{} {:.0}%\n", bar, p.percent));
    s.push_str(&format!(
        "{:.1} / {:.1} hours",
        p.hours_completed, p.total_hours
    ));
    if p.is_complete {
        s.push_str(" (complete)\n");
    } else {
        s.push_str(&format!(", {:.1} remaining\n", p.hours_remaining));
    }
    s.push_str(&format!(
        "Days logged: {} worked, {} excluded\n",
        p.worked_days, p.excluded_days
    ));
    s
}
