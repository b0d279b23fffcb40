/// Held-key tracking on top of terminal key events.
///
/// Terminals report presses, not key state.  Instead of acting on each event
/// individually, the tracker records the tick of the last press/repeat event
/// for every key and treats a key as held while that tick is recent enough.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire after `HOLD_WINDOW` ticks of silence,
///   which is shorter than the OS repeat interval.
///
/// The tracker is told which class it is on; with release events a key is
/// held from its press until its release and never times out.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::entities::Controls;

/// A key counts as held if its last press/repeat arrived within this many
/// ticks (≈133 ms at 30 Hz, longer than any OS repeat interval).
pub const HOLD_WINDOW: u64 = 4;

/// One-shot outcomes of a key event that the loop must act on immediately.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    None,
    Quit,
}

pub fn is_quit_key(event: &KeyEvent) -> bool {
    match event.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') => event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[derive(Debug)]
pub struct KeyTracker {
    last_seen: HashMap<KeyCode, u64>,
    release_events: bool,
}

impl KeyTracker {
    /// `release_events` is true when the terminal reports key releases.
    pub fn new(release_events: bool) -> Self {
        KeyTracker {
            last_seen: HashMap::new(),
            release_events,
        }
    }

    /// Fold one key event into the tracker.
    pub fn record(&mut self, event: &KeyEvent, frame: u64) -> Signal {
        match event.kind {
            KeyEventKind::Press => {
                self.last_seen.insert(event.code, frame);
                if is_quit_key(event) {
                    return Signal::Quit;
                }
            }
            KeyEventKind::Repeat => {
                self.last_seen.insert(event.code, frame);
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&event.code);
            }
        }
        Signal::None
    }

    pub fn is_held(&self, key: KeyCode, frame: u64) -> bool {
        self.last_seen
            .get(&key)
            .map(|&last| self.release_events || frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    /// Sample the keys the simulation reads.
    pub fn controls(&self, frame: u64) -> Controls {
        Controls {
            jump: self.is_held(KeyCode::Up, frame),
            duck: self.is_held(KeyCode::Down, frame),
        }
    }
}
