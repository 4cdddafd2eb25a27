//! External player integration.
//!
//! The player is organized into submodules:
//! - `command`: transport commands and their textual wire encoding
//! - `channel`: the one-directional command sink (mpv IPC path)
//! - `process`: spawning the player process

mod channel;
mod command;
mod process;

pub use channel::{ChannelError, CommandSink, MpvChannel};
pub use command::Command;
pub use process::spawn_player;
