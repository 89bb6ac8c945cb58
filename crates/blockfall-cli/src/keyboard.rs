//! Keyboard to button mapping for terminals.
//!
//! The engine wants the set of buttons held on each frame. Terminals with
//! keyboard enhancement report presses and releases, so the held set is
//! exact. Others only report presses (and auto-repeat presses), in which case
//! a key counts as released once no event has arrived for it within the
//! release timeout.

use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use blockfall_engine::{Button, ButtonSet};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A key with no press or repeat event for this long counts as released.
const KEY_RELEASE_TIMEOUT: Duration = Duration::from_millis(150);

/// What a key event meant to the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub(crate) enum KeyInput {
    Button(Button),
    Quit,
    Unmapped,
}

/// Maps a key to its logical button.
pub(crate) fn map_key(event: &KeyEvent) -> KeyInput {
    let shifted = event.modifiers.contains(KeyModifiers::SHIFT);
    let button = match event.code {
        KeyCode::Left if shifted => Button::LeftShift,
        KeyCode::Right if shifted => Button::RightShift,
        KeyCode::Up => Button::Up,
        KeyCode::Down => Button::Down,
        KeyCode::Left => Button::Left,
        KeyCode::Right => Button::Right,
        KeyCode::Char('z' | 'Z') => Button::A,
        KeyCode::Char('x' | 'X') => Button::B,
        KeyCode::Char('c' | 'C') => Button::C,
        KeyCode::Char('a' | 'A') => Button::LeftShift,
        KeyCode::Char('s' | 'S') => Button::RightShift,
        KeyCode::Enter => Button::Start,
        KeyCode::Esc | KeyCode::Backspace => Button::Stop,
        KeyCode::Char('q' | 'Q') => return KeyInput::Quit,
        _ => return KeyInput::Unmapped,
    };
    KeyInput::Button(button)
}

/// Held buttons, tracked from key events.
///
/// Keys are tracked by key code with the button their last press mapped to,
/// so a release clears that button even when the modifiers changed in
/// between (Shift let go before the arrow).
#[derive(Debug)]
pub(crate) struct Keyboard {
    held: HashMap<KeyCode, (Button, Instant)>,
    /// Presses seen since the last frame, so a tap shorter than a frame still counts.
    tapped: ButtonSet,
    reports_release: bool,
}

impl Default for Keyboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Keyboard {
    pub(crate) fn new() -> Self {
        Self {
            held: HashMap::new(),
            tapped: ButtonSet::EMPTY,
            reports_release: false,
        }
    }

    /// Records a key event and returns what it meant.
    pub(crate) fn handle_key(&mut self, event: &KeyEvent, now: Instant) -> KeyInput {
        let input = map_key(event);
        let KeyInput::Button(button) = input else {
            return input;
        };
        let code = key_slot(event.code);
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.held.insert(code, (button, now));
                self.tapped.insert(button);
            }
            KeyEventKind::Release => {
                self.reports_release = true;
                self.held.remove(&code);
            }
        }
        input
    }

    /// Returns the buttons held at `now` and forgets the taps recorded so far.
    pub(crate) fn buttons(&mut self, now: Instant) -> ButtonSet {
        if !self.reports_release {
            self.held.retain(|_, (_, seen)| {
                now.saturating_duration_since(*seen) <= KEY_RELEASE_TIMEOUT
            });
        }
        let mut buttons = std::mem::take(&mut self.tapped);
        for (button, _) in self.held.values() {
            buttons.insert(*button);
        }
        buttons
    }
}

/// Letters are tracked case-insensitively, so `Z` pressed with Shift and
/// released without it is the same key.
fn key_slot(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        code => code,
    }
}
