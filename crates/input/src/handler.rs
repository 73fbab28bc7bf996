//! Soft drop hold tracking for terminal environments.
//!
//! Most terminals only report key presses (auto-repeat arrives as more
//! presses) and never a release. A hold therefore ends either on a real
//! release event or after `key_release_timeout_ms` without a press of the
//! soft drop key.

use arrayvec::ArrayVec;
use crossterm::event::{KeyCode, KeyEvent};

use crate::map::{handle_key_event, is_soft_drop_key};
use crate::types::{GameAction, SOFT_DROP_GRACE_MS};

/// Actions produced by a single key event.
pub type KeyActions = ArrayVec<GameAction, 2>;

#[derive(Debug, Clone)]
pub struct InputHandler {
    down_held: bool,
    /// Time since the soft drop key was last seen pressed.
    since_down_ms: u32,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            down_held: false,
            since_down_ms: 0,
            key_release_timeout_ms: SOFT_DROP_GRACE_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn soft_drop_held(&self) -> bool {
        self.down_held
    }

    /// Handle a key press (or auto-repeat).
    ///
    /// The first soft drop press steps the piece once and starts the hold;
    /// repeats only keep the hold alive.
    pub fn handle_key_press(&mut self, key: KeyEvent) -> KeyActions {
        let mut actions = KeyActions::new();

        if is_soft_drop_key(key.code) {
            self.since_down_ms = 0;
            if !self.down_held {
                self.down_held = true;
                actions.push(GameAction::SoftDrop);
                actions.push(GameAction::SoftDropStart);
            }
            return actions;
        }

        if let Some(action) = handle_key_event(key) {
            actions.push(action);
        }
        actions
    }

    pub fn handle_key_release(&mut self, code: KeyCode) -> Option<GameAction> {
        if is_soft_drop_key(code) {
            return self.release();
        }
        None
    }

    /// Advance the release timeout; emits `SoftDropStop` when it expires.
    pub fn update(&mut self, elapsed_ms: u32) -> Option<GameAction> {
        if !self.down_held {
            return None;
        }
        self.since_down_ms = self.since_down_ms.saturating_add(elapsed_ms);
        if self.since_down_ms > self.key_release_timeout_ms {
            return self.release();
        }
        None
    }

    /// Forget any hold (e.g. after a restart).
    pub fn reset(&mut self) {
        self.down_held = false;
        self.since_down_ms = 0;
    }

    fn release(&mut self) -> Option<GameAction> {
        if !self.down_held {
            return None;
        }
        self.reset();
        Some(GameAction::SoftDropStop)
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
