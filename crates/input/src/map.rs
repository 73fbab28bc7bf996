//! Fixed key bindings.
//!
//! Letter keys match regardless of case, so Caps Lock and Shift do not change
//! the controls.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key press to a game action. Unbound keys yield `None`.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if is_soft_drop_key(key.code) {
        return Some(GameAction::SoftDrop);
    }
    let action = match key.code {
        KeyCode::Left => GameAction::MoveLeft,
        KeyCode::Right => GameAction::MoveRight,
        KeyCode::Up => GameAction::RotateCw,
        KeyCode::Enter => GameAction::Restart,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'a' | 'h' => GameAction::MoveLeft,
            'd' | 'l' => GameAction::MoveRight,
            'w' | 'k' => GameAction::RotateCw,
            'z' => GameAction::RotateCcw,
            ' ' => GameAction::HardDrop,
            'r' => GameAction::Restart,
            _ => return None,
        },
        _ => return None,
    };
    Some(action)
}

/// Keys that soft drop while held: Down, `s` and `j`.
pub fn is_soft_drop_key(code: KeyCode) -> bool {
    match code {
        KeyCode::Down => true,
        KeyCode::Char(c) => matches!(c.to_ascii_lowercase(), 's' | 'j'),
        _ => false,
    }
}

/// `q`, Esc or Ctrl-C.
pub fn should_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char(c) => c.eq_ignore_ascii_case(&'q'),
        _ => false,
    }
}
