//! Terminal presentation.
//!
//! Clears and redraws the status block each tick: title, author, elapsed
//! over total, time left in the track, current chapter, and the controls
//! line. Raw mode and the alternate screen are owned by [`TerminalGuard`]
//! so the terminal is restored even on early exit.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::session::{Presenter, SessionView};

const CONTROLS_LINE: &str =
    "Controls: 'p' Pause/Resume | 's' Stop | 'f' Forward 30s | 'b' Backward 30s | 'n' Next Chapter | 'm' Previous Chapter";

/// RAII guard for terminal state.
///
/// Enters raw mode and the alternate screen on construction, restores
/// both on drop.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Best effort; nothing to report to if this fails
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Presenter writing the session view to the terminal.
#[derive(Debug, Default)]
pub struct TerminalUi;

impl Presenter for TerminalUi {
    fn present(&mut self, view: &SessionView) -> Result<()> {
        let mut stdout = io::stdout();
        queue!(stdout, MoveTo(0, 0), Clear(ClearType::All))?;
        queue!(
            stdout,
            MoveTo(0, 0),
            Print(format!("Title: {}", view.title)),
            MoveTo(0, 1),
            Print(format!("Author: {}", view.author)),
            MoveTo(0, 2),
            Print(format!(
                "Current Time: {:.2}s / {:.2}s",
                view.elapsed, view.total_duration
            )),
            MoveTo(0, 3),
            Print(format!("Time Left in Track: {:.2}s", view.time_left)),
            MoveTo(0, 4),
            Print(format!("Current Chapter: {}", view.chapter_title)),
            MoveTo(0, 5),
            Print(CONTROLS_LINE),
        )?;
        stdout.flush()?;
        Ok(())
    }
}
