//! JSON snapshot of one profile: settings, attendance history, and the
//! pre-aggregated completed-hours total.

use anyhow::{Context, Result};
use ojtally_core::{AttendanceRecord, Settings, worked_hours};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub settings: Option<Settings>,
    #[serde(default)]
    pub logs: Vec<AttendanceRecord>,
    /// Running total kept by the caller. Derived from `logs` when absent.
    #[serde(default)]
    pub hours_completed: Option<f64>,
}

impl Snapshot {
    /// The completed total handed to the engine.
    pub fn hours_completed(&self) -> f64 {
        self.hours_completed.unwrap_or_else(|| worked_hours(&self.logs))
    }

    /// Replace the attendance history, dropping any stale completed total.
    pub fn with_logs(mut self, logs: Vec<AttendanceRecord>) -> Self {
        self.logs = logs;
        self.hours_completed = None;
        self
    }
}

pub fn parse_snapshot(json: &str) -> Result<Snapshot> {
    serde_json::from_str(json).context("parse snapshot json")
}

pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Snapshot> {
    let p = path.as_ref();
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    parse_snapshot(&s).with_context(|| format!("in {}", p.display()))
}
