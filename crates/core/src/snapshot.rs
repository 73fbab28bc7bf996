use crate::game_state::ActivePiece;
use crate::pieces::Shape;
use crate::types::{GameStatus, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Read-only view of the falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl ActiveSnapshot {
    /// Absolute board coordinates of the piece's filled cells.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let (x, y) = (self.x, self.y);
        self.shape.filled().map(move |(dx, dy)| (x + dx, y + dy))
    }
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Row-major palette ids, 0 = empty (see `PieceKind::id`).
    pub board: Vec<u8>,
    pub active: Option<ActiveSnapshot>,
    pub score: u32,
    pub lines: u32,
    pub status: GameStatus,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.width = BOARD_WIDTH;
        self.height = BOARD_HEIGHT;
        self.board.clear();
        self.board
            .resize(BOARD_WIDTH as usize * BOARD_HEIGHT as usize, 0);
        self.active = None;
        self.score = 0;
        self.lines = 0;
        self.status = GameStatus::Playing;
    }

    /// Palette id at `(x, y)`, 0 when empty or out of bounds.
    pub fn cell(&self, x: u8, y: u8) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.board
            .get(y as usize * self.width as usize + x as usize)
            .copied()
            .unwrap_or(0)
    }

    pub fn game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            width: 0,
            height: 0,
            board: Vec::new(),
            active: None,
            score: 0,
            lines: 0,
            status: GameStatus::Playing,
        };
        s.clear();
        s
    }
}
