//! Tracing subscriber setup.
//!
//! Output goes to a file because the alternate screen owns stdout/stderr
//! while the UI runs.
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber writing to `path`, filtered by `directive`.
///
/// An unparseable directive falls back to `info`.
pub fn init_tracing(directive: &str, path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow!("install tracing subscriber: {e}"))
}
