//! The playback control loop.
//!
//! A single cooperative loop: compute elapsed time, resolve the current
//! chapter, publish a view, poll for at most one key, dispatch the mapped
//! command to the player, checkpoint the position, sleep to the next tick
//! boundary. The session never models "paused" itself; pause and stop are
//! forwarded to the external player while the loop keeps ticking and
//! displaying.
//!
//! Submodules:
//! - `clock`: time source abstraction (virtual clock in tests)
//! - `input`: bounded-wait key source
//! - `keymap`: the fixed key bindings
//! - `state`: the per-tick `SessionView` snapshot

pub mod clock;
pub mod input;
pub mod keymap;
pub mod state;

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::{debug, warn};

use crate::chapters::ChapterIndex;
use crate::metadata::TrackMetadata;
use crate::player::{Command, CommandSink};
use crate::position::PositionStore;

pub use clock::{Clock, SystemClock};
pub use input::{InputSource, KeyPress, TerminalInput};
pub use keymap::{action_for_key, Action};
pub use state::SessionView;

/// Consumer of per-tick session state.
///
/// A failing presenter is a recoverable condition; the loop logs it and
/// keeps ticking.
pub trait Presenter {
    fn present(&mut self, view: &SessionView) -> anyhow::Result<()>;
}

/// Upper bound on how long a tick waits for a pending key before it goes
/// back to sleeping out the tick interval.
const INPUT_POLL_BOUND: Duration = Duration::from_millis(250);

/// Loop timing and seek parameters.
#[derive(Debug, Clone, Copy)]
pub struct SessionTiming {
    /// Fixed tick period
    pub tick_interval: Duration,
    /// Checkpoint the position once this much elapsed time has passed
    /// since the last successful save, in seconds
    pub save_interval: f64,
    /// Relative seek size for the skip keys, in seconds
    pub skip_seconds: f64,
}

impl Default for SessionTiming {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            save_interval: 5.0,
            skip_seconds: 30.0,
        }
    }
}

/// The playback session: owns elapsed-time tracking and drives the
/// chapter index, command sink, position store, and presenter.
pub struct PlaybackSession<S, C, I, P> {
    metadata: TrackMetadata,
    index: ChapterIndex,
    store: PositionStore,
    sink: S,
    clock: C,
    input: I,
    presenter: P,
    timing: SessionTiming,
    /// Offset playback resumed from; elapsed time is anchored to this
    /// plus the wall clock at loop start and is never re-anchored by
    /// seeks (displayed time drifts from actual playback after a seek,
    /// matching what the player was asked to do only eventually).
    resume_offset: f64,
}

impl<S, C, I, P> PlaybackSession<S, C, I, P>
where
    S: CommandSink,
    C: Clock,
    I: InputSource,
    P: Presenter,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        metadata: TrackMetadata,
        index: ChapterIndex,
        store: PositionStore,
        sink: S,
        clock: C,
        input: I,
        presenter: P,
        timing: SessionTiming,
        resume_offset: f64,
    ) -> Self {
        Self {
            metadata,
            index,
            store,
            sink,
            clock,
            input,
            presenter,
            timing,
            resume_offset,
        }
    }

    /// Run the control loop until `stop` is raised.
    ///
    /// `stop` is set by the Ctrl-C handler (or the test harness); there is
    /// no in-loop completion state. All per-tick failures are absorbed
    /// here and surfaced as diagnostics only.
    pub fn run(&mut self, stop: &AtomicBool) {
        let loop_start = self.clock.now();
        let mut last_saved = self.resume_offset;

        while !stop.load(Ordering::Relaxed) {
            let tick_start = self.clock.now();
            let elapsed = (tick_start - loop_start).as_secs_f64() + self.resume_offset;

            let view = SessionView {
                title: self.metadata.title.clone(),
                author: self.metadata.author.clone(),
                elapsed,
                time_left: self.metadata.total_duration - elapsed,
                total_duration: self.metadata.total_duration,
                chapter_title: self.index.locate(elapsed).to_string(),
            };
            if let Err(err) = self.presenter.present(&view) {
                warn!(%err, "failed to render session state");
            }

            match self.input.poll_key(INPUT_POLL_BOUND.min(self.timing.tick_interval)) {
                Ok(Some(KeyPress::Interrupt)) => {
                    debug!("interrupt key, stopping session");
                    stop.store(true, Ordering::Relaxed);
                    continue;
                }
                Ok(Some(KeyPress::Char(key))) => {
                    if let Some(action) = action_for_key(key) {
                        self.dispatch(action, elapsed);
                    }
                }
                Ok(None) => {}
                Err(err) => warn!(%err, "failed to poll input"),
            }

            // Elapsed-interval checkpoint; a seek issued this tick is not
            // checkpointed immediately.
            if elapsed - last_saved >= self.timing.save_interval {
                match self.store.save(elapsed) {
                    Ok(()) => last_saved = elapsed,
                    Err(err) => warn!(%err, "failed to save playback position"),
                }
            }

            let tick_spent = self.clock.now() - tick_start;
            if let Some(remaining) = self.timing.tick_interval.checked_sub(tick_spent) {
                self.clock.sleep(remaining);
            }
        }
    }

    /// Resolve an action against the current elapsed time and send the
    /// resulting command.
    ///
    /// Chapter jumps are computed from the controller's own `elapsed`, not
    /// the player's actual position; a send failure is logged and the loop
    /// carries on, since the user may still want to watch the chapter
    /// position.
    fn dispatch(&mut self, action: Action, elapsed: f64) {
        let command = self.command_for(action, elapsed);
        debug!(?action, %command, elapsed, "dispatching transport command");
        if let Err(err) = self.sink.send(&command) {
            warn!(%err, %command, "failed to send player command");
        }
    }

    fn command_for(&self, action: Action, elapsed: f64) -> Command {
        match action {
            Action::TogglePause => Command::TogglePause,
            Action::Stop => Command::Stop,
            Action::SkipForward => Command::SeekRelative(self.timing.skip_seconds),
            Action::SkipBackward => Command::SeekRelative(-self.timing.skip_seconds),
            Action::NextChapter => {
                Command::SeekAbsolute(self.index.next_chapter_start(elapsed))
            }
            Action::PreviousChapter => {
                Command::SeekAbsolute(self.index.previous_chapter_start(elapsed))
            }
        }
    }
}
