//! External player process launch.
//!
//! mpv is spawned once per session in audio-only mode, seeked to the
//! resume offset, with its IPC server listening on the channel path. Its
//! lifetime is not managed beyond the spawn; if it exits, the controller
//! keeps ticking and reports channel failures as they occur.

use std::path::Path;
use std::process::{Child, Command, Stdio};

use anyhow::{Context, Result};
use tracing::info;

/// Spawn the external player for `media_file`.
///
/// # Arguments
/// * `binary` - Player binary name or path (normally `mpv`)
/// * `media_file` - Track to play
/// * `start_offset` - Initial seek position in seconds
/// * `ipc_path` - Path the player's IPC server listens on
pub fn spawn_player(
    binary: &str,
    media_file: &Path,
    start_offset: f64,
    ipc_path: &Path,
) -> Result<Child> {
    info!(
        binary,
        media_file = %media_file.display(),
        start_offset,
        ipc_path = %ipc_path.display(),
        "spawning player"
    );

    Command::new(binary)
        .arg("--no-video")
        .arg(format!("--start={start_offset}"))
        .arg(format!("--input-ipc-server={}", ipc_path.display()))
        .arg(media_file)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to spawn player '{binary}'"))
}
