use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use ojtally_core::{
    EntryInput, ProgressSummary, calculate_completion_date_with, format_date, parse_date,
    parse_hours_input, upcoming_scheduled_days, validate_entry,
};
use ojtally_ingest::{Snapshot, load_snapshot, read_attendance_csv};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod report;
mod state;

use config::{Config, load_config};

#[derive(Parser, Debug)]
#[command(
    name = "ojtally",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("OJTALLY_BUILD_SHA"), ")"),
    about = "Internship hour tracking and completion-date prediction"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Snapshot JSON with settings + logs (default: ~/.ojtally/snapshot.json)
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Attendance CSV (date,hours_worked,status); replaces the snapshot's logs
    #[arg(long)]
    logs: Option<PathBuf>,

    /// Override today's date (YYYY-MM-DD)
    #[arg(long)]
    today: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate the date the hour requirement will be met
    Predict {
        #[command(flatten)]
        input: InputArgs,

        /// Print JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Show hours completed and remaining
    Progress {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// List upcoming scheduled days that have nothing logged yet
    Upcoming {
        #[command(flatten)]
        input: InputArgs,

        /// Days ahead to look (default from config.forecast.upcoming_days)
        #[arg(long)]
        days: Option<u32>,
    },

    /// Check an entry against the daily/weekly limits without storing it
    CheckEntry {
        #[command(flatten)]
        input: InputArgs,

        /// Date of the entry (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Hours worked, free-form ("7,5", "8 hrs")
        #[arg(long, conflicts_with = "excluded", required_unless_present = "excluded")]
        hours: Option<String>,

        /// Mark the date as excluded (holiday, leave)
        #[arg(long, default_value_t = false)]
        excluded: bool,

        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Config file helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default ~/.ojtally/config.toml
    Init,
    /// Print the effective configuration
    Show,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = load_config()?;

    match cli.command {
        Command::Predict { input, json } => {
            let (snap, today) = load_inputs(&input, &cfg)?;
            tracing::info!(%today, logs = snap.logs.len(), "predicting");
            let prediction = calculate_completion_date_with(
                &cfg.policy(),
                snap.settings.as_ref(),
                &snap.logs,
                snap.hours_completed(),
                today,
            );
            if json {
                println!("{}", serde_json::to_string_pretty(&prediction)?);
            } else {
                print!("{}", report::render_prediction(&prediction));
            }
        }

        Command::Progress { input, json } => {
            let (snap, _) = load_inputs(&input, &cfg)?;
            let progress =
                ProgressSummary::new(snap.settings.as_ref(), &snap.logs, snap.hours_completed());
            if json {
                println!("{}", serde_json::to_string_pretty(&progress)?);
            } else {
                print!("{}", report::render_progress(&progress));
            }
        }

        Command::Upcoming { input, days } => {
            let (snap, today) = load_inputs(&input, &cfg)?;
            let Some(settings) = snap.settings.as_ref() else {
                bail!("snapshot has no settings");
            };
            let schedule = settings.schedule().context("weekly_schedule")?;
            let days = days.unwrap_or(cfg.forecast.upcoming_days);
            let upcoming = upcoming_scheduled_days(schedule, &snap.logs, today, days);
            if upcoming.is_empty() {
                println!("No open scheduled days in the next {days} days.");
            }
            for d in upcoming {
                println!("{}", format_date(d));
            }
        }

        Command::CheckEntry {
            input,
            date,
            hours,
            excluded,
            json,
        } => {
            let (snap, _) = load_inputs(&input, &cfg)?;
            let Some(settings) = snap.settings.as_ref() else {
                bail!("snapshot has no settings");
            };
            let date = parse_date(&date)?;
            let entry = match (excluded, hours) {
                (true, _) => EntryInput::Excluded,
                (false, Some(text)) => EntryInput::Worked(parse_hours_input(&text)?),
                (false, None) => bail!("pass --hours <h> or --excluded"),
            };

            let record = validate_entry(settings, &snap.logs, date, entry)
                .with_context(|| format!("entry for {} rejected", format_date(date)))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                println!(
                    "OK: {} {:?} {:.1}h",
                    format_date(record.date),
                    record.status,
                    record.hours_worked
                );
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

/// Resolve the snapshot (optionally with CSV logs) and today's date.
fn load_inputs(input: &InputArgs, cfg: &Config) -> Result<(Snapshot, NaiveDate)> {
    let snapshot_path = match &input.snapshot {
        Some(p) => p.clone(),
        None => state::default_snapshot_path()?,
    };
    if !snapshot_path.exists() {
        bail!(
            "Snapshot not found: {} (pass --snapshot <path>)",
            snapshot_path.display()
        );
    }

    let mut snap = load_snapshot(&snapshot_path)?;
    if let Some(csv) = &input.logs {
        let logs = read_attendance_csv(csv)?;
        snap = snap.with_logs(logs);
    }

    let today = match &input.today {
        Some(s) => parse_date(s).context("--today")?,
        None => cfg.today()?,
    };

    Ok((snap, today))
}
