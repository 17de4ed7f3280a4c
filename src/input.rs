//! Keyboard handling: crossterm key events in, game actions out.
//!
//! Works on two classes of terminal:
//! * **Keyboard-enhancement capable** (kitty protocol and friends): proper
//!   `Press` / `Repeat` / `Release` events, so key-up is reported directly.
//! * **Classic terminals**: only `Press` events (OS key-repeat shows up as
//!   repeated presses).  A held key is considered released once it has been
//!   silent for `HOLD_WINDOW` frames.  As soon as a real `Release` arrives
//!   the tracker stops guessing.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::entities::Direction;

/// Frames a direction key stays held without a repeat on terminals that
/// never report releases.  Longer than the usual OS initial repeat delay
/// (≈ 500 ms at 30 FPS) so a held key does not stutter.
pub const HOLD_WINDOW: u64 = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Press(Direction),
    Release(Direction),
    /// Explicit quit: `q`, `Esc`, `Ctrl-C`.
    Quit,
    /// Any other key press.  Ends the session on the game-over screen.
    AnyKey,
}

#[derive(Debug, Default)]
pub struct KeyTracker {
    /// Frame of the last press/repeat for each held direction.
    left: Option<u64>,
    right: Option<u64>,
    /// Set once the terminal has proven it reports key releases.
    reports_release: bool,
}

fn direction_for(code: &KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        _ => None,
    }
}

fn is_quit(code: &KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports_release(&self) -> bool {
        self.reports_release
    }

    fn slot(&mut self, direction: Direction) -> Option<&mut Option<u64>> {
        match direction {
            Direction::Left => Some(&mut self.left),
            Direction::Right => Some(&mut self.right),
            Direction::Stop => None,
        }
    }

    /// Translate one terminal event seen during `frame`.  Non-key events and
    /// `Repeat` events produce nothing.
    pub fn on_event(&mut self, event: &Event, frame: u64) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        }) = event
        else {
            return None;
        };

        match kind {
            KeyEventKind::Press => {
                if is_quit(code, *modifiers) {
                    return Some(Action::Quit);
                }
                match direction_for(code) {
                    Some(direction) => {
                        // Every press steers, even while the key still counts as held.
                        *self.slot(direction)? = Some(frame);
                        Some(Action::Press(direction))
                    }
                    None => Some(Action::AnyKey),
                }
            }
            KeyEventKind::Repeat => {
                self.reports_release = true;
                let direction = direction_for(code)?;
                *self.slot(direction)? = Some(frame);
                None
            }
            KeyEventKind::Release => {
                self.reports_release = true;
                let direction = direction_for(code)?;
                self.slot(direction)?.take().map(|_| Action::Release(direction))
            }
        }
    }

    /// Releases for keys that went quiet, on terminals without key-up events.
    pub fn expire(&mut self, frame: u64) -> Vec<Action> {
        if self.reports_release {
            return Vec::new();
        }
        let mut released = Vec::new();
        for (direction, slot) in [
            (Direction::Left, &mut self.left),
            (Direction::Right, &mut self.right),
        ] {
            if let Some(last) = *slot {
                if frame.saturating_sub(last) > HOLD_WINDOW {
                    *slot = None;
                    released.push(Action::Release(direction));
                }
            }
        }
        released
    }
}
