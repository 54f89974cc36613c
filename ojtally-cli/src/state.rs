use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$OJTALLY_HOME`, or `~/.ojtally`.
pub fn ojtally_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("OJTALLY_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".ojtally"))
}

pub fn ensure_ojtally_home() -> Result<PathBuf> {
    let dir = ojtally_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Snapshot used when no `--snapshot` is given.
pub fn default_snapshot_path() -> Result<PathBuf> {
    Ok(ojtally_home()?.join("snapshot.json"))
}
