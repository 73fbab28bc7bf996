//! Pieces module - tetromino shape catalog and rotation
//!
//! A [`Shape`] is a small occupancy grid (at most 4x4) anchored at its top-left
//! corner. Rotation produces a new grid with width and height swapped; there
//! are no wall kicks, so the caller decides whether the rotated grid fits.

use crate::types::{PieceKind, RotationDir};

/// Largest edge of any shape grid.
pub const MAX_SHAPE_DIM: usize = 4;

/// Binary occupancy grid of one piece in one orientation.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    /// `cells[y][x]`; entries outside `width x height` stay false.
    cells: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

/// Build a shape from 0/1 rows at compile time.
const fn grid<const W: usize, const H: usize>(rows: [[u8; W]; H]) -> Shape {
    let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
    let mut y = 0;
    while y < H {
        let mut x = 0;
        while x < W {
            cells[y][x] = rows[y][x] != 0;
            x += 1;
        }
        y += 1;
    }
    Shape {
        width: W as u8,
        height: H as u8,
        cells,
    }
}

const I_SHAPE: Shape = grid([[1, 1, 1, 1]]);
const O_SHAPE: Shape = grid([[1, 1], [1, 1]]);
const T_SHAPE: Shape = grid([[0, 1, 0], [1, 1, 1]]);
const S_SHAPE: Shape = grid([[0, 1, 1], [1, 1, 0]]);
const Z_SHAPE: Shape = grid([[1, 1, 0], [0, 1, 1]]);
const J_SHAPE: Shape = grid([[1, 0, 0], [1, 1, 1]]);
const L_SHAPE: Shape = grid([[0, 0, 1], [1, 1, 1]]);

/// Spawn template for a piece kind.
pub fn get_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::Z => Z_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
    }
}

/// Column that centers a shape of `shape_width` on a board of `board_width`.
///
/// Both halves are floored, so a 4-wide I on a 10-wide board spawns at 3.
pub fn spawn_x(board_width: u8, shape_width: u8) -> i8 {
    (board_width / 2) as i8 - (shape_width / 2) as i8
}

impl Shape {
    /// Build a shape from rows of `'#'` (filled) and anything else (empty).
    ///
    /// Returns `None` for an empty row list, ragged rows or anything larger
    /// than 4x4.
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.chars().count();
        if height > MAX_SHAPE_DIM || width == 0 || width > MAX_SHAPE_DIM {
            return None;
        }

        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return None;
            }
            for (x, ch) in row.chars().enumerate() {
                cells[y][x] = ch == '#';
            }
        }

        Some(Self {
            width: width as u8,
            height: height as u8,
            cells,
        })
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether `(x, y)` inside the grid is filled.
    pub fn is_filled(&self, x: u8, y: u8) -> bool {
        x < self.width && y < self.height && self.cells[y as usize][x as usize]
    }

    /// Offsets `(dx, dy)` of the filled cells, row by row.
    pub fn filled(self) -> impl Iterator<Item = (i8, i8)> {
        (0..self.height).flat_map(move |y| {
            (0..self.width)
                .filter(move |&x| self.cells[y as usize][x as usize])
                .map(move |x| (x as i8, y as i8))
        })
    }

    /// The grid turned 90° in `dir`. Width and height swap.
    pub fn rotated(&self, dir: RotationDir) -> Self {
        let (w, h) = (self.width as usize, self.height as usize);
        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];

        // Result is h wide and w tall.
        for (y, row) in cells.iter_mut().enumerate().take(w) {
            for (x, cell) in row.iter_mut().enumerate().take(h) {
                *cell = match dir {
                    RotationDir::Cw => self.cells[h - 1 - x][y],
                    RotationDir::Ccw => self.cells[x][w - 1 - y],
                };
            }
        }

        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }
}

impl std::fmt::Debug for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for y in 0..self.height {
            let row: String = (0..self.width)
                .map(|x| if self.is_filled(x, y) { '#' } else { '.' })
                .collect();
            list.entry(&row);
        }
        list.finish()
    }
}
