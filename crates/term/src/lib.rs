//! Terminal rendering for the game.
//!
//! Frames are drawn into a plain framebuffer of styled characters, which the
//! [`TerminalRenderer`] flushes to the terminal by diffing against the
//! previous frame. The view itself is pure and unit-testable.

pub mod fb;
pub mod game_view;
pub mod palette;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
