use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::debug;

use crate::ledger::AppState;
use crate::models::LedgerData;

/// Returns the path to the ledger file (`ledger.json`).
///
/// The path is determined in the following order:
/// 1. `WORKLEDGER_DB` environment variable.
/// 2. `~/.local/share/workledger/ledger.json` (on Linux).
/// 3. `./ledger.json` (fallback).
pub fn db_path() -> PathBuf {
    std::env::var("WORKLEDGER_DB").map(PathBuf::from).unwrap_or_else(|_| {
        let mut p = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("workledger");
        if !p.exists() {
            let _ = fs::create_dir_all(&p);
        }
        p.push("ledger.json");
        p
    })
}

fn read_text(path: &Path) -> Result<String> {
    let mut f = OpenOptions::new()
        .read(true)
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let mut s = String::new();
    f.read_to_string(&mut s)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(s)
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    let mut f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("Failed to open {} for writing", path.display()))?;
    f.write_all(text.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Loads the ledger document.
///
/// A missing file yields the defaults. A file that cannot be parsed is an
/// error, so a later save never overwrites data the user still has.
pub fn load_data() -> Result<LedgerData> {
    let path = db_path();
    if !path.exists() {
        debug!(path = %path.display(), "no ledger file yet, using defaults");
        return Ok(LedgerData::default());
    }
    let s = read_text(&path)?;
    if s.trim().is_empty() {
        return Ok(LedgerData::default());
    }
    serde_json::from_str(&s)
        .with_context(|| format!("Ledger file {} is not valid", path.display()))
}

pub fn load_state() -> Result<AppState> {
    load_data().map(AppState::new)
}

/// Saves the ledger document, overwriting the existing file.
pub fn save_data(data: &LedgerData) -> Result<()> {
    let path = db_path();
    let s = serde_json::to_string_pretty(data)?;
    write_text(&path, &s)?;
    debug!(path = %path.display(), bytes = s.len(), "ledger saved");
    Ok(())
}

pub fn save_state(state: &AppState) -> Result<()> {
    save_data(state.data())
}

/// File name used when exporting without an explicit destination.
pub fn default_export_name(today: NaiveDate) -> String {
    format!("workledger-data-{}.json", today.format("%Y-%m-%d"))
}

/// Writes the whole ledger document to `path`.
pub fn export_to(state: &AppState, path: &Path) -> Result<()> {
    let s = state.export_json()?;
    write_text(path, &s)
}

/// Merges the document at `path` into `state`. On failure `state` is untouched.
pub fn import_from(state: &mut AppState, path: &Path) -> Result<()> {
    let s = read_text(path)?;
    state
        .import_json(&s)
        .with_context(|| format!("Could not import {}", path.display()))
}
