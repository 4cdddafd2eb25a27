//! Configuration file handling.
//!
//! Optional TOML config at `~/.config/tome/config.toml`; every field has
//! a default so a missing file just means defaults. The transport keymap
//! is fixed and deliberately not configurable here.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::session::SessionTiming;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub player: PlayerConfig,
    pub playback: PlaybackConfig,
    pub state: StateConfig,
}

/// External player settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Player binary name or path
    pub binary: String,
    /// IPC channel path the player listens on
    pub socket_path: PathBuf,
}

/// Loop timing and seek settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Tick period in milliseconds
    pub tick_interval_ms: u64,
    /// Seconds of elapsed time between position checkpoints
    pub save_interval_secs: f64,
    /// Relative seek size for the skip keys, in seconds
    pub skip_seconds: f64,
}

/// On-disk state settings. Defaults are relative to the working
/// directory, matching where the controller is launched from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StateConfig {
    /// Resume-position file
    pub position_file: PathBuf,
    /// Diagnostic log file
    pub log_file: PathBuf,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            binary: "mpv".to_string(),
            socket_path: PathBuf::from("/tmp/mpv-socket"),
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            save_interval_secs: 5.0,
            skip_seconds: 30.0,
        }
    }
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            position_file: PathBuf::from("tome-position"),
            log_file: PathBuf::from("tome.log"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            player: PlayerConfig::default(),
            playback: PlaybackConfig::default(),
            state: StateConfig::default(),
        }
    }
}

impl Config {
    /// Path of the config file under the user config directory.
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("tome").join("config.toml"))
    }

    /// Load the config file, falling back to defaults when it does not
    /// exist. A present-but-invalid file is an error, not a silent
    /// fallback.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load a specific config file. Unlike [`Config::load`], a missing
    /// file is an error here: the caller asked for this file by name.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Loop timing derived from the playback section.
    pub fn session_timing(&self) -> SessionTiming {
        SessionTiming {
            tick_interval: Duration::from_millis(self.playback.tick_interval_ms),
            save_interval: self.playback.save_interval_secs,
            skip_seconds: self.playback.skip_seconds,
        }
    }
}
