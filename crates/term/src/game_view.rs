//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{base_shape, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::sheet::{BlockSheet, EMPTY_TILE, PREVIEW_TILE_OFFSET};
use crate::types::{Cell as BoardCell, PieceKind, BOARD_WIDTH, VISIBLE_HEIGHT};

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);

const CONTROLS: [&str; 7] = [
    "Left: Move left",
    "Right: Move right",
    "Up: Rotate",
    "Down: Soft drop",
    "Space: Drop all the way",
    "P/Click: Pause",
    "Q: Quit",
];

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the Tetris game.
///
/// Board cells are drawn with tiles from a [`BlockSheet`], so one board cell
/// covers `tile_w x tile_h` terminal cells. Only the 20 visible rows are
/// drawn; row 0 (the bottom of the board) is the last line of the playfield.
pub struct GameView {
    sheet: BlockSheet,
    anchor_y: AnchorY,
}

impl GameView {
    pub fn new(sheet: BlockSheet) -> Self {
        Self {
            sheet,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn sheet(&self) -> &BlockSheet {
        &self.sheet
    }

    fn cell_w(&self) -> u16 {
        self.sheet.tile_w() as u16
    }

    fn cell_h(&self) -> u16 {
        self.sheet.tile_h() as u16
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w();
        let board_px_h = (VISIBLE_HEIGHT as u16) * self.cell_h();
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        // Locked cells and the falling piece (already composed).
        for row in 0..VISIBLE_HEIGHT as usize {
            for col in 0..BOARD_WIDTH as usize {
                let cell = snap.cells[row][col];
                let (tile, dim) = match cell.tile_index() {
                    Some(tile) => (tile, false),
                    None => (EMPTY_TILE, true),
                };
                let style = CellStyle {
                    dim,
                    ..CellStyle::new(cell_color(cell), PLAYFIELD_BG)
                };
                self.draw_board_tile(fb, start_x, start_y, row, col, tile, style);
            }
        }

        // Ghost, only where nothing else is drawn.
        let ghost_style = CellStyle {
            dim: true,
            ..CellStyle::new(cell_color(BoardCell::Ghost), PLAYFIELD_BG)
        };
        if let Some(ghost_tile) = BoardCell::Ghost.tile_index() {
            for p in snap.visible_ghost() {
                if (p.row as u8) < VISIBLE_HEIGHT {
                    self.draw_board_tile(
                        fb,
                        start_x,
                        start_y,
                        p.row as usize,
                        p.col as usize,
                        ghost_tile,
                        ghost_style,
                    );
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);

        if snap.game_over {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        } else if snap.paused {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "Game Pause");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

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

    #[allow(clippy::too_many_arguments)]
    fn draw_board_tile(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        row: usize,
        col: usize,
        tile: usize,
        style: CellStyle,
    ) {
        // Board row 0 is the bottom line of the playfield.
        let screen_row = (VISIBLE_HEIGHT as u16) - 1 - row as u16;
        let px = start_x + 1 + col as u16 * self.cell_w();
        let py = start_y + 1 + screen_row * self.cell_h();
        fb.blit(px, py, self.sheet.tile(tile), style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
        };
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = start_y;
        fb.put_str(panel_x, y, "Score", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "Level", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.level, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "Next Piece", label);
        y = y.saturating_add(1);
        self.draw_preview(fb, panel_x, y, snap.next);
        y = y.saturating_add(2 * self.cell_h() + 1);

        let dim = CellStyle { dim: true, ..value };
        for line in CONTROLS {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, dim);
            y = y.saturating_add(1);
        }
    }

    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind) {
        let color = kind.color();
        let Some(tile) = color.tile_index() else {
            return;
        };
        let style = CellStyle::new(cell_color(color), Rgb::new(0, 0, 0));
        for p in base_shape(kind).points() {
            // Base shapes span rows 0..=1; row 1 is drawn on top.
            let px = x + p.col as u16 * self.cell_w();
            let py = y + (1 - p.row as u16) * self.cell_h();
            fb.blit(px, py, self.sheet.tile(PREVIEW_TILE_OFFSET + tile), style);
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle {
            bold: true,
            ..CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0))
        };
        fb.put_str(x, mid_y, text, style);
    }
}

/// Foreground color for a board cell.
pub fn cell_color(cell: BoardCell) -> Rgb {
    match cell {
        BoardCell::Empty => Rgb::new(90, 90, 100),
        BoardCell::Cyan => Rgb::new(80, 220, 220),
        BoardCell::Blue => Rgb::new(80, 120, 220),
        BoardCell::Orange => Rgb::new(255, 165, 0),
        BoardCell::Yellow => Rgb::new(240, 220, 80),
        BoardCell::Green => Rgb::new(100, 220, 120),
        BoardCell::Purple => Rgb::new(200, 120, 220),
        BoardCell::Red => Rgb::new(220, 80, 80),
        BoardCell::Ghost => Rgb::new(140, 140, 140),
    }
}
