//! tome - chapter-aware terminal controller for audiobook playback.
//!
//! Tracks elapsed playback time against a chapter table, drives an
//! external mpv process over its textual IPC channel, and persists the
//! resume position across sessions. The player does the audio; tome does
//! the chapters, transport keys, and bookkeeping.

pub mod chapters;
pub mod config;
pub mod logging;
pub mod metadata;
pub mod player;
pub mod position;
pub mod session;
pub mod ui;

pub use chapters::{Chapter, ChapterIndex, UNKNOWN_CHAPTER};
pub use config::Config;
pub use metadata::{TrackMetadata, UNKNOWN_AUTHOR, UNKNOWN_TITLE};
pub use player::{ChannelError, Command, CommandSink, MpvChannel};
pub use position::PositionStore;
pub use session::{PlaybackSession, Presenter, SessionTiming, SessionView};
pub use ui::{TerminalGuard, TerminalUi};
