//! Transport commands and their wire encoding.
//!
//! mpv's IPC accepts plain input-conf commands, one per line. Each
//! [`Command`] encodes to the exact line(s) the player expects.

/// A transport command for the external player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Toggle pause/resume
    TogglePause,
    /// Stop playback
    Stop,
    /// Seek by a signed offset in seconds
    SeekRelative(f64),
    /// Seek to an absolute position in seconds
    SeekAbsolute(f64),
}

impl Command {
    /// Encode this command as protocol lines, in dispatch order.
    ///
    /// `Stop` encodes as two lines: the stop itself, then `no-screenshot`
    /// to suppress mpv's screenshot warning on stop.
    pub fn encode(&self) -> Vec<String> {
        match self {
            Command::TogglePause => vec!["cycle pause".to_string()],
            Command::Stop => vec!["stop".to_string(), "no-screenshot".to_string()],
            Command::SeekRelative(secs) => vec![format!("seek {} relative", secs)],
            Command::SeekAbsolute(secs) => vec![format!("seek {} absolute", secs)],
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::TogglePause => write!(f, "toggle-pause"),
            Command::Stop => write!(f, "stop"),
            Command::SeekRelative(secs) => write!(f, "seek-relative({})", secs),
            Command::SeekAbsolute(secs) => write!(f, "seek-absolute({})", secs),
        }
    }
}
