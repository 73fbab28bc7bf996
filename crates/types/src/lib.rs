//! Core types module - shared data structures and constants
//!
//! Everything here is plain data with no dependencies, so the same types can be
//! used by the game core, the terminal view and the input layer.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//!
//! Both can be changed per game through the core configuration, but never
//! after a board has been created.
//!
//! # Game Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval of the game loop (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Gravity interval |
//! | `SOFT_DROP_INTERVAL_MS` | 50 | Gravity interval while soft drop is held |
//! | `SOFT_DROP_GRACE_MS` | 150 | Soft drop hold released after this long without a key event |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, RotationDir, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(RotationDir::Cw.inverse(), RotationDir::Ccw);
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Default board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Default board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Smallest board edge accepted by the core.
pub const MIN_BOARD_DIM: u8 = 4;

/// Largest board edge accepted by the core.
pub const MAX_BOARD_DIM: u8 = 40;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval: one row per second
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity interval while the soft drop key is held.
pub const SOFT_DROP_INTERVAL_MS: u32 = 50;

/// Soft drop hold timeout for terminals that never report key release.
pub const SOFT_DROP_GRACE_MS: u32 = 150;

/// Points for the first row cleared by a single landing.
pub const LINE_CLEAR_BASE: u32 = 100;

/// The seven tetromino piece kinds
///
/// A kind doubles as the color id of every cell the piece leaves behind:
/// - **I**: cyan bar
/// - **O**: yellow square
/// - **T**: purple
/// - **S**: green
/// - **Z**: red
/// - **J**: blue
/// - **L**: orange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Catalog order. Spawn selection and palette ids follow this order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("L"), Some(PieceKind::L));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Palette id used in snapshots (1..=7, 0 is reserved for empty).
    pub fn id(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::id`].
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }
}

/// Direction of a 90° rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDir {
    Cw,
    Ccw,
}

impl RotationDir {
    /// The rotation that undoes this one.
    pub fn inverse(&self) -> Self {
        match self {
            RotationDir::Cw => RotationDir::Ccw,
            RotationDir::Ccw => RotationDir::Cw,
        }
    }
}

/// Game actions that can be applied to modify game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one row; lands it when blocked
    SoftDrop,
    /// Drop piece to the lowest free row and land it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Soft drop key went down: gravity switches to the fast interval
    SoftDropStart,
    /// Soft drop key went up
    SoftDropStop,
    /// Start a new game (only accepted after game over)
    Restart,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("softdropstart"), Some(GameAction::SoftDropStart));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "softdropstart" => Some(GameAction::SoftDropStart),
            "softdropstop" => Some(GameAction::SoftDropStop),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::SoftDropStart => "softDropStart",
            GameAction::SoftDropStop => "softDropStop",
            GameAction::Restart => "restart",
        }
    }
}

/// Whether pieces are still falling.
///
/// `Playing -> GameOver` happens when a fresh piece cannot be placed or a
/// landing leaves the top row filled; `GameOver -> Playing` only through
/// [`GameAction::Restart`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    #[default]
    Playing,
    GameOver,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Playing => "playing",
            GameStatus::GameOver => "game_over",
        }
    }
}

/// Core-side event emitted after a piece lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub line_clear_score: u32,
    /// The landing ended the game.
    pub game_over: bool,
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a piece of that kind
pub type Cell = Option<PieceKind>;
