//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{Cell, CellStyle, FrameBuffer};
use crate::palette;
use crate::types::PieceKind;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Screen position of the board frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

const KEY_HELP: [&str; 5] = ["<- -> move", "up   rotate", "z    rotate ccw", "down soft drop", "spc  hard drop"];

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps cells roughly square in most fonts.
        Self { cell_w: 2, cell_h: 1 }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    fn frame(&self, snap: &GameSnapshot, viewport: Viewport) -> Frame {
        let w = snap.width as u16 * self.cell_w + 2;
        let h = snap.height as u16 * self.cell_h + 2;
        Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        }
    }

    /// Render a frame into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let frame = self.frame(snap, viewport);
        self.draw_border(fb, frame);

        for y in 0..snap.height {
            for x in 0..snap.width {
                match PieceKind::from_id(snap.cell(x, y)) {
                    Some(kind) => self.draw_block(fb, frame, x as i8, y as i8, kind),
                    None => self.draw_empty(fb, frame, x, y),
                }
            }
        }

        if let Some(active) = snap.active {
            for (x, y) in active.cells() {
                self.draw_block(fb, frame, x, y, active.kind);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.game_over() {
            self.draw_game_over(fb, frame, snap.score);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame) {
        let style = CellStyle::new(palette::BORDER, palette::BACKGROUND);
        let Frame { x, y, w, h } = frame;

        fb.fill_rect(x + 1, y + 1, w - 2, h - 2, ' ', CellStyle::new(palette::GRID_DOT, palette::WELL));
        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn cell_origin(&self, frame: Frame, x: u16, y: u16) -> (u16, u16) {
        (frame.x + 1 + x * self.cell_w, frame.y + 1 + y * self.cell_h)
    }

    fn draw_empty(&self, fb: &mut FrameBuffer, frame: Frame, x: u8, y: u8) {
        let (px, py) = self.cell_origin(frame, x as u16, y as u16);
        fb.put_char(px, py, '·', CellStyle::new(palette::GRID_DOT, palette::WELL));
    }

    /// Draw one filled cell; cells off the visible board are skipped.
    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: i8, y: i8, kind: PieceKind) {
        let cols = (frame.w - 2) / self.cell_w;
        let rows = (frame.h - 2) / self.cell_h;
        if x < 0 || y < 0 || x as u16 >= cols || y as u16 >= rows {
            return;
        }
        let (px, py) = self.cell_origin(frame, x as u16, y as u16);
        let style = CellStyle::new(palette::piece_color(kind), palette::WELL).bold();
        fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x.saturating_add(12) > viewport.width {
            return;
        }

        let label = CellStyle::new(palette::TEXT, palette::BACKGROUND).bold();
        let value = CellStyle::new(palette::TEXT, palette::BACKGROUND);

        let mut y = frame.y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.score, value);
        y += 3;

        fb.put_str(panel_x, y, "LINES", label);
        fb.put_u32(panel_x, y + 1, snap.lines, value);
        y += 3;

        for line in KEY_HELP {
            fb.put_str(panel_x, y, line, value);
            y += 1;
        }
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, frame: Frame, score: u32) {
        let style = CellStyle::new(palette::BANNER, palette::BACKGROUND).bold();
        let mid_y = frame.y + frame.h / 2;
        let centered = |len: u16| frame.x + frame.w.saturating_sub(len) / 2;

        fb.put_str(centered(9), mid_y - 1, "GAME OVER", style);

        let digits = score.checked_ilog10().unwrap_or(0) as u16 + 1;
        let end = fb.put_str(centered(6 + digits), mid_y, "FINAL ", style);
        fb.put_u32(end, mid_y, score, style);

        fb.put_str(centered(13), mid_y + 1, "ENTER restart", style);
    }
}
