//! Resume-position persistence.
//!
//! A single floating-point offset (seconds into the track) written to a
//! small state file so a later session can pick up where this one left
//! off. Reads never fail the caller; writes go through a temp file and an
//! atomic rename so a crash mid-write cannot leave a partial value behind.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Errors that can occur while persisting the resume position.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to write position file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to replace position file {path}: {source}")]
    Replace {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Persists and loads the resume offset for a single track.
#[derive(Debug, Clone)]
pub struct PositionStore {
    path: PathBuf,
}

impl PositionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted resume offset.
    ///
    /// Returns `0.0` when no prior state exists or the file cannot be read
    /// or parsed; a corrupt state file means starting from the beginning,
    /// never an error for the caller.
    pub fn load(&self) -> f64 {
        match fs::read_to_string(&self.path) {
            Ok(content) => match content.trim().parse::<f64>() {
                Ok(position) if position >= 0.0 => position,
                Ok(position) => {
                    debug!(path = ?self.path, position, "negative saved position, starting from 0");
                    0.0
                }
                Err(err) => {
                    debug!(path = ?self.path, %err, "unparseable position file, starting from 0");
                    0.0
                }
            },
            Err(err) => {
                debug!(path = ?self.path, %err, "no saved position, starting from 0");
                0.0
            }
        }
    }

    /// Persist `position`, replacing any previous value.
    ///
    /// Writes to a sibling temp file first and renames it into place, so a
    /// concurrent crash leaves either the old value or the new one, never a
    /// truncated file.
    pub fn save(&self, position: f64) -> Result<(), StoreError> {
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, format!("{position}\n")).map_err(|source| StoreError::Write {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Replace {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = ?self.path, position, "saved playback position");
        Ok(())
    }
}
