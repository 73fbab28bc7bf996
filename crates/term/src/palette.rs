//! Colors for piece kinds. Board cells only store the kind.

use crate::fb::Rgb;
use crate::types::PieceKind;

pub const BACKGROUND: Rgb = Rgb::new(0, 0, 0);
pub const WELL: Rgb = Rgb::new(30, 30, 40);
pub const GRID_DOT: Rgb = Rgb::new(90, 90, 100);
pub const BORDER: Rgb = Rgb::new(200, 200, 200);
pub const TEXT: Rgb = Rgb::new(220, 220, 220);
pub const BANNER: Rgb = Rgb::new(255, 255, 255);

/// Fill color of a piece kind.
pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(0, 255, 255),
        PieceKind::O => Rgb::new(255, 255, 0),
        PieceKind::T => Rgb::new(128, 0, 128),
        PieceKind::S => Rgb::new(0, 128, 0),
        PieceKind::Z => Rgb::new(255, 0, 0),
        PieceKind::J => Rgb::new(0, 0, 255),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}
