//! Board module - manages the game grid
//!
//! The board is a fixed-size grid where each cell is empty or holds the kind of
//! the piece that filled it. Storage is a flat, row-major vector allocated once;
//! the dimensions never change after construction.
//!
//! Coordinates are `(x, y)` with `x` growing to the right and `y` growing
//! downward. Row 0 is the top visible row; negative rows sit above the board
//! and are where freshly spawned or rotated pieces may poke out.

use arrayvec::ArrayVec;

use crate::pieces::Shape;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, MAX_BOARD_DIM, MIN_BOARD_DIM};

/// Row indices removed by one call to [`Board::clear_full_rows`].
pub type ClearedRows = ArrayVec<usize, { MAX_BOARD_DIM as usize }>;

/// The game board
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: u8,
    height: u8,
    /// Row-major cells (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty 10x20 board
    pub fn new() -> Self {
        Self::with_size(BOARD_WIDTH, BOARD_HEIGHT)
    }

    /// Create an empty board of the given size.
    ///
    /// # Panics
    ///
    /// Panics if either edge is outside `MIN_BOARD_DIM..=MAX_BOARD_DIM`.
    pub fn with_size(width: u8, height: u8) -> Self {
        assert!(
            (MIN_BOARD_DIM..=MAX_BOARD_DIM).contains(&width)
                && (MIN_BOARD_DIM..=MAX_BOARD_DIM).contains(&height),
            "board size {}x{} out of range",
            width,
            height
        );
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= self.width as i8 || y < 0 || y >= self.height as i8 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y), `None` when out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Whether a single piece cell at `(x, y)` would be blocked.
    ///
    /// Walls and floor block; so does any filled cell. Rows above the top never
    /// block, whatever the column.
    #[inline]
    pub fn blocks(&self, x: i8, y: i8) -> bool {
        if y < 0 {
            return false;
        }
        x < 0 || x >= self.width as i8 || y >= self.height as i8 || self.is_occupied(x, y)
    }

    /// Collision check for a whole shape with its origin at `(x, y)`.
    pub fn collides(&self, shape: &Shape, x: i8, y: i8) -> bool {
        shape.filled().any(|(dx, dy)| self.blocks(x + dx, y + dy))
    }

    /// Write `kind` into every board cell covered by `shape` at `(x, y)`.
    ///
    /// Callers must have checked [`Board::collides`] for this exact origin.
    /// Cells above the top row are dropped.
    pub fn merge(&mut self, shape: &Shape, x: i8, y: i8, kind: PieceKind) {
        debug_assert!(!self.collides(shape, x, y));
        for (dx, dy) in shape.filled() {
            self.set(x + dx, y + dy, Some(kind));
        }
    }

    fn row(&self, y: usize) -> &[Cell] {
        let w = self.width as usize;
        &self.cells[y * w..(y + 1) * w]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        y < self.height as usize && self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Check if a row has no filled cell
    pub fn is_row_empty(&self, y: usize) -> bool {
        y < self.height as usize && self.row(y).iter().all(|cell| cell.is_none())
    }

    /// Remove every full row, shifting the rows above it down.
    ///
    /// Rows are scanned bottom to top with a read/write cursor pair, so the
    /// surviving rows keep their order and the vacated rows at the top end up
    /// empty. Returns the original indices of the removed rows, bottom first.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let width = self.width as usize;
        let mut write_y = self.height as usize;

        for read_y in (0..self.height as usize).rev() {
            if self.is_row_full(read_y) {
                cleared.push(read_y);
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * width;
                self.cells.copy_within(src..src + width, write_y * width);
            }
        }

        self.cells[..write_y * width].fill(None);
        cleared
    }

    /// Number of filled cells on the whole board
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Row-major view of all cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Empty every cell, keeping the dimensions
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Write palette ids (0 = empty) into `out`, reusing its allocation.
    pub fn write_u8_grid(&self, out: &mut Vec<u8>) {
        out.clear();
        out.extend(self.cells.iter().map(|cell| cell.map_or(0, |kind| kind.id())));
    }

    /// Build a board from text rows, `.` for empty and a piece letter for filled.
    ///
    /// Rows are placed at the bottom of a board of the given size.
    ///
    /// # Panics
    ///
    /// Panics if there are more rows than the board is tall.
    pub fn from_rows(width: u8, height: u8, rows: &[&str]) -> Self {
        assert!(
            rows.len() <= height as usize,
            "{} rows do not fit a board {} rows tall",
            rows.len(),
            height
        );
        let mut board = Self::with_size(width, height);
        let top = height as usize - rows.len();
        for (i, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let cell = PieceKind::from_str(&ch.to_string());
                board.set(x as i8, (top + i) as i8, cell);
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
