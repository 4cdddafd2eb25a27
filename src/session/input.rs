//! Key input for the control loop.
//!
//! A bounded-wait input source: each tick asks for at most one pending
//! key and never blocks past the given timeout. The terminal
//! implementation sits on crossterm's event queue; tests script their own
//! sequence of keys.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A single key observed by the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    /// A printable key (the transport keymap operates on these)
    Char(char),
    /// Ctrl-C; in raw mode this arrives as a key event, not a signal
    Interrupt,
}

/// Bounded-wait source of key events.
pub trait InputSource {
    /// Wait up to `timeout` for one key. `Ok(None)` means nothing was
    /// pending within the bound.
    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<KeyPress>>;
}

/// Terminal-backed input source (crossterm, raw mode).
#[derive(Debug, Default)]
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<KeyPress>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) => Ok(translate_key(key)),
            // Resize, focus, mouse: nothing for the transport loop
            _ => Ok(None),
        }
    }
}

fn translate_key(key: KeyEvent) -> Option<KeyPress> {
    // Key release events would double-fire on Windows terminals
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(KeyPress::Interrupt)
        }
        KeyCode::Char(c) => Some(KeyPress::Char(c)),
        _ => None,
    }
}
