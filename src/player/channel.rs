//! One-directional command channel to the external player.
//!
//! The concrete transport is a filesystem path (mpv's
//! `--input-ipc-server` socket), hidden behind the [`CommandSink`] trait so
//! tests can substitute an in-memory sink. The channel is fire-and-forget:
//! nothing is read back, and a dead receiver is a recoverable condition the
//! control loop logs and keeps running through.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::command::Command;

/// Errors that can occur while dispatching a command to the player.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Failed to open player channel {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write to player channel {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Message sink for transport commands.
///
/// Commands are dispatched in call order; there is no acknowledgment,
/// reordering, or coalescing.
pub trait CommandSink {
    fn send(&mut self, command: &Command) -> Result<(), ChannelError>;
}

/// Sink writing commands to mpv's IPC path, one line per protocol command,
/// flushed so the player observes them immediately.
#[derive(Debug, Clone)]
pub struct MpvChannel {
    path: PathBuf,
}

impl MpvChannel {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CommandSink for MpvChannel {
    fn send(&mut self, command: &Command) -> Result<(), ChannelError> {
        let mut channel =
            OpenOptions::new()
                .write(true)
                .open(&self.path)
                .map_err(|source| ChannelError::Open {
                    path: self.path.clone(),
                    source,
                })?;

        for line in command.encode() {
            debug!(%command, %line, "sending player command");
            writeln!(channel, "{line}").map_err(|source| ChannelError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        channel.flush().map_err(|source| ChannelError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
