//! CLI entry point.
//!
//! Probes the track, builds the chapter index, spawns mpv seeked to the
//! saved position, and hands control to the playback session until the
//! user interrupts.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use tome::chapters::ChapterIndex;
use tome::player::{spawn_player, MpvChannel};
use tome::position::PositionStore;
use tome::session::{PlaybackSession, SystemClock, TerminalInput};
use tome::ui::{TerminalGuard, TerminalUi};
use tome::{metadata, Config};

/// Chapter-aware terminal controller for audiobook playback via mpv.
#[derive(Debug, Parser)]
#[command(name = "tome", version, about)]
struct Cli {
    /// Audiobook file to play
    file: PathBuf,

    /// IPC socket path for the player (overrides config)
    #[arg(long)]
    socket: Option<PathBuf>,

    /// Ignore any saved position and start from the beginning
    #[arg(long)]
    from_start: bool,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(socket) = cli.socket {
        config.player.socket_path = socket;
    }

    tome::logging::init(&config.state.log_file)?;
    info!(file = %cli.file.display(), "starting session");

    // Fatal if the track cannot be probed; the session cannot start
    // without a chapter table and total duration.
    let track = metadata::probe(&cli.file)
        .with_context(|| format!("Failed to probe metadata for {}", cli.file.display()))?;
    let index = ChapterIndex::new(track.chapters.clone());
    if index.is_empty() {
        warn!("track has no chapter table, chapter display and jumps will be no-ops");
    }

    let store = PositionStore::new(&config.state.position_file);
    let resume_offset = if cli.from_start { 0.0 } else { store.load() };

    let _player = spawn_player(
        &config.player.binary,
        &cli.file,
        resume_offset,
        &config.player.socket_path,
    )?;
    let channel = MpvChannel::new(&config.player.socket_path);

    let stop = Arc::new(AtomicBool::new(false));
    let handler_stop = stop.clone();
    ctrlc::set_handler(move || handler_stop.store(true, Ordering::Relaxed))
        .context("Failed to install interrupt handler")?;

    let guard = TerminalGuard::new()?;
    let mut session = PlaybackSession::new(
        track,
        index,
        store,
        channel,
        SystemClock::new(),
        TerminalInput,
        TerminalUi,
        config.session_timing(),
        resume_offset,
    );
    session.run(&stop);
    drop(guard);

    info!("session stopped");
    Ok(())
}
