//! Control-loop scenarios run against a virtual clock, scripted input,
//! and in-memory collaborators.

use std::collections::VecDeque;
use std::io;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tempfile::TempDir;
use tome::chapters::{Chapter, ChapterIndex};
use tome::metadata::TrackMetadata;
use tome::player::{ChannelError, Command, CommandSink};
use tome::position::PositionStore;
use tome::session::{Clock, InputSource, KeyPress, PlaybackSession, Presenter, SessionTiming};
use tome::SessionView;

/// Clock whose time only moves when the loop sleeps.
struct VirtualClock {
    now: Arc<Mutex<Duration>>,
}

impl VirtualClock {
    fn new() -> (Self, Arc<Mutex<Duration>>) {
        let now = Arc::new(Mutex::new(Duration::ZERO));
        (Self { now: now.clone() }, now)
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> Duration {
        *self.now.lock().unwrap()
    }

    fn sleep(&mut self, duration: Duration) {
        *self.now.lock().unwrap() += duration;
    }
}

/// One scripted key (or none) per tick; interrupts once the script runs
/// out so the loop terminates.
struct ScriptedInput {
    script: VecDeque<Option<KeyPress>>,
}

impl ScriptedInput {
    fn new(keys: impl IntoIterator<Item = Option<char>>) -> Self {
        Self {
            script: keys
                .into_iter()
                .map(|k| k.map(KeyPress::Char))
                .collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll_key(&mut self, _timeout: Duration) -> io::Result<Option<KeyPress>> {
        Ok(self
            .script
            .pop_front()
            .unwrap_or(Some(KeyPress::Interrupt)))
    }
}

/// Sink recording every encoded protocol line, optionally failing each
/// send.
struct RecordingSink {
    lines: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl RecordingSink {
    fn new(fail: bool) -> (Self, Arc<Mutex<Vec<String>>>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                lines: lines.clone(),
                fail,
            },
            lines,
        )
    }
}

impl CommandSink for RecordingSink {
    fn send(&mut self, command: &Command) -> Result<(), ChannelError> {
        self.lines.lock().unwrap().extend(command.encode());
        if self.fail {
            return Err(ChannelError::Write {
                path: "fake".into(),
                source: io::Error::new(io::ErrorKind::BrokenPipe, "receiver gone"),
            });
        }
        Ok(())
    }
}

/// Presenter recording every published view.
struct RecordingPresenter {
    views: Arc<Mutex<Vec<SessionView>>>,
}

impl RecordingPresenter {
    fn new() -> (Self, Arc<Mutex<Vec<SessionView>>>) {
        let views = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                views: views.clone(),
            },
            views,
        )
    }
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, view: &SessionView) -> anyhow::Result<()> {
        self.views.lock().unwrap().push(view.clone());
        Ok(())
    }
}

fn track() -> TrackMetadata {
    TrackMetadata {
        title: "The Gunslinger".to_string(),
        author: "Stephen King".to_string(),
        total_duration: 600.0,
        chapters: vec![],
    }
}

fn index() -> ChapterIndex {
    ChapterIndex::new(vec![
        Chapter::new(0.0, 300.0, "Ch1"),
        Chapter::new(300.0, 600.0, "Ch2"),
    ])
}

struct Harness {
    _dir: TempDir,
    store_path: std::path::PathBuf,
    lines: Arc<Mutex<Vec<String>>>,
    views: Arc<Mutex<Vec<SessionView>>>,
}

/// Run a session over the scripted keys and return the recorded output.
fn run_session(
    keys: impl IntoIterator<Item = Option<char>>,
    resume_offset: f64,
    failing_sink: bool,
) -> Harness {
    let dir = TempDir::new().unwrap();
    let store_path = dir.path().join("position");
    let (clock, _now) = VirtualClock::new();
    let (sink, lines) = RecordingSink::new(failing_sink);
    let (presenter, views) = RecordingPresenter::new();

    let mut session = PlaybackSession::new(
        track(),
        index(),
        PositionStore::new(&store_path),
        sink,
        clock,
        ScriptedInput::new(keys),
        presenter,
        SessionTiming::default(),
        resume_offset,
    );
    session.run(&AtomicBool::new(false));

    Harness {
        _dir: dir,
        store_path,
        lines,
        views,
    }
}

#[test]
fn next_then_previous_are_evaluated_at_tracked_elapsed() {
    // 'n' at elapsed 50 targets Ch2's start; the controller's own clock
    // keeps advancing, so the following 'm' is evaluated at ~51 and
    // targets Ch1's start, not the post-seek player position.
    let harness = run_session([Some('n'), Some('m')], 50.0, false);
    let lines = harness.lines.lock().unwrap();
    assert_eq!(*lines, vec!["seek 300 absolute", "seek 0 absolute"]);
}

#[test]
fn next_chapter_past_last_start_is_a_noop_seek() {
    let harness = run_session([Some('n')], 400.0, false);
    let lines = harness.lines.lock().unwrap();
    assert_eq!(*lines, vec!["seek 400 absolute"]);
}

#[test]
fn skip_keys_send_relative_seeks() {
    let harness = run_session([Some('f'), Some('b')], 0.0, false);
    let lines = harness.lines.lock().unwrap();
    assert_eq!(*lines, vec!["seek 30 relative", "seek -30 relative"]);
}

#[test]
fn stop_key_sends_stop_and_screenshot_suppression() {
    let harness = run_session([Some('s'), None], 0.0, false);
    let lines = harness.lines.lock().unwrap();
    assert_eq!(*lines, vec!["stop", "no-screenshot"]);
    // The loop kept ticking after the stop command
    assert!(harness.views.lock().unwrap().len() >= 2);
}

#[test]
fn failed_sends_do_not_stop_subsequent_ticks() {
    let harness = run_session([Some('p'), None, Some('p'), None], 0.0, true);
    let views = harness.views.lock().unwrap();
    assert_eq!(views.len(), 5); // 4 scripted ticks + the interrupt tick
    let lines = harness.lines.lock().unwrap();
    assert_eq!(*lines, vec!["cycle pause", "cycle pause"]);
}

#[test]
fn views_track_elapsed_chapter_and_time_left() {
    let harness = run_session([None, None], 299.0, false);
    let views = harness.views.lock().unwrap();

    assert_eq!(views[0].elapsed, 299.0);
    assert_eq!(views[0].chapter_title, "Ch1");
    assert_eq!(views[0].time_left, 301.0);
    assert_eq!(views[0].title, "The Gunslinger");
    assert_eq!(views[0].author, "Stephen King");

    // One virtual second later the boundary has been crossed
    assert_eq!(views[1].elapsed, 300.0);
    assert_eq!(views[1].chapter_title, "Ch2");
}

#[test]
fn unmapped_keys_send_nothing() {
    let harness = run_session([Some('q'), Some('x')], 0.0, false);
    assert!(harness.lines.lock().unwrap().is_empty());
}

#[test]
fn position_is_saved_on_elapsed_interval() {
    // Twelve quiet ticks at one virtual second each: checkpoints fire at
    // elapsed 5 and 10, so the last saved value is 10.
    let harness = run_session(vec![None; 12], 0.0, false);
    let store = PositionStore::new(&harness.store_path);
    assert_eq!(store.load(), 10.0);
}

#[test]
fn no_save_before_first_interval_elapses() {
    let harness = run_session(vec![None; 3], 0.0, false);
    assert!(!harness.store_path.exists());
}

#[test]
fn save_interval_is_relative_to_resume_offset() {
    // Resuming at 7.3 must not save until 12.3, regardless of whether
    // int(elapsed) happens to divide evenly.
    let harness = run_session(vec![None; 4], 7.3, false);
    assert!(!harness.store_path.exists());

    let harness = run_session(vec![None; 6], 7.3, false);
    let store = PositionStore::new(&harness.store_path);
    assert_eq!(store.load(), 12.3);
}
