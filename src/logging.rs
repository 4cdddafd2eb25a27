//! Diagnostic logging.
//!
//! The subscriber is constructed explicitly here and installed once from
//! `main`; components only emit `tracing` events and never configure
//! logging themselves. Output goes to a log file so it does not fight the
//! terminal display for stdout.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::Level;

/// Install a file-backed subscriber as the process-wide dispatcher.
///
/// Call once, before any component runs. Returns an error if the log
/// file cannot be created or a subscriber is already installed.
pub fn init(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .with_max_level(Level::DEBUG)
        .with_target(true)
        .try_init()
        .map_err(|err| anyhow::anyhow!("Failed to install tracing subscriber: {err}"))
}
