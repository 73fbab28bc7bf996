//! Terminal input module.
//!
//! Maps `crossterm` key events onto [`crate::types::GameAction`]. Bindings are
//! fixed. The [`InputHandler`] also tracks whether the soft drop key is held,
//! including on terminals that never report key release.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, is_soft_drop_key, should_quit};
