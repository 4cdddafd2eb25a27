//! Fixed transport keymap.
//!
//! The bindings are part of the program's interface, not configuration:
//! `p` pause/resume, `s` stop, `f`/`b` skip 30 s, `n`/`m` chapter jumps.

/// A transport action requested by the user.
///
/// Actions are resolved into concrete [`crate::player::Command`]s by the
/// session, which supplies the current elapsed time for chapter jumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    TogglePause,
    Stop,
    SkipForward,
    SkipBackward,
    NextChapter,
    PreviousChapter,
}

/// Map a key to its transport action, if any.
pub fn action_for_key(key: char) -> Option<Action> {
    match key {
        'p' => Some(Action::TogglePause),
        's' => Some(Action::Stop),
        'f' => Some(Action::SkipForward),
        'b' => Some(Action::SkipBackward),
        'n' => Some(Action::NextChapter),
        'm' => Some(Action::PreviousChapter),
        _ => None,
    }
}
