//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds every game rule. It has no dependencies on the terminal,
//! input devices or the clock; time only enters through
//! [`GameState::tick`](game_state::GameState::tick).
//!
//! # Module Structure
//!
//! - [`board`]: fixed-size grid with collision checks, merging and line clearing
//! - [`pieces`]: the seven shape templates and 90° rotation
//! - [`rng`]: seeded uniform piece selection (plus scripted sequences)
//! - [`scoring`]: points per landing, doubling or flat
//! - [`game_state`]: active piece, score, status and the action machine
//! - [`snapshot`]: read-only frame data for renderers
//! - [`config`]: tunable rules (intervals, board size, scoring rule)
//!
//! # Rules
//!
//! - New pieces are picked uniformly at random and spawn centered on row 0
//! - Rotation is a plain 90° turn of the shape grid, with no wall kicks; a
//!   blocked rotation is simply dropped
//! - Cells above the top edge never collide
//! - A piece that cannot spawn, or a landing that leaves the top row filled,
//!   ends the game; only a restart leaves that state
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::{GameAction, GameStatus};
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.board().filled_count(), 4);
//! assert_eq!(game.status(), GameStatus::Playing);
//! ```

pub mod board;
pub mod config;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows};
pub use config::GameConfig;
pub use game_state::{ActivePiece, GameState};
pub use pieces::{get_shape, spawn_x, Shape};
pub use rng::{PieceFactory, SimpleRng};
pub use scoring::{line_clear_score, ScoringRule};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
