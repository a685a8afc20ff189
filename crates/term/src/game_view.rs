//! GameView: maps an [`Engine`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Every board cell becomes a `cell_w` x `cell_h` rectangle inside a border.
//! Falling blocks are red, landed blocks are blue. Falling blocks between two
//! rows are drawn in the row holding their top edge.

use crate::core::{Block, Board, Engine, Piece};
use crate::fb::{CellStyle, FrameBuffer, Rgb};

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

/// Session counters kept by the loop driver, shown in the side panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionView {
    pub games_played: u32,
    pub last_final_score: Option<u32>,
}

const PLAY_BG: Rgb = Rgb::new(20, 20, 28);
const FALLING: Rgb = Rgb::new(220, 60, 60);
const LANDED: Rgb = Rgb::new(70, 110, 230);
const BLOCK_CHAR: char = '█';

/// A lightweight terminal renderer for the simulation.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

/// Top-left terminal position of the play area (inside the border)
#[derive(Debug, Clone, Copy)]
struct Origin {
    x: u16,
    y: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        engine: &Engine,
        session: Option<&SessionView>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let board = engine.board();
        let play_w = board.cols().saturating_mul(self.cell_w);
        let play_h = board.rows().saturating_mul(self.cell_h);
        let frame_w = play_w.saturating_add(2);
        let frame_h = play_h.saturating_add(2);

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;
        let origin = Origin {
            x: start_x + 1,
            y: start_y + 1,
        };

        fb.fill_rect(origin.x, origin.y, play_w, play_h, ' ', CellStyle::new(PLAY_BG, PLAY_BG));
        draw_border(fb, start_x, start_y, frame_w, frame_h);

        for (cell, block) in board.occupants() {
            self.draw_cell(fb, origin, cell.row, cell.col, block);
        }
        self.draw_piece(fb, origin, board, engine.active());

        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        self.draw_side_panel(fb, engine, session, viewport, panel_x, start_y);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, engine: &Engine, session: Option<&SessionView>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(engine, session, viewport, &mut fb);
        fb
    }

    fn draw_piece(&self, fb: &mut FrameBuffer, origin: Origin, board: &Board, piece: &Piece) {
        for block in piece.blocks() {
            let cell = board.cell_of(block.position());
            if board.is_in_bounds(cell) {
                self.draw_cell(fb, origin, cell.row, cell.col, block);
            }
        }
    }

    fn draw_cell(&self, fb: &mut FrameBuffer, origin: Origin, row: i32, col: i32, block: &Block) {
        if row < 0 || col < 0 {
            return;
        }
        let fg = if block.landed { LANDED } else { FALLING };
        let style = CellStyle::new(fg, PLAY_BG);
        let px = origin.x.saturating_add((col as u16).saturating_mul(self.cell_w));
        let py = origin.y.saturating_add((row as u16).saturating_mul(self.cell_h));
        fb.fill_rect(px, py, self.cell_w, self.cell_h, BLOCK_CHAR, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        engine: &Engine,
        session: Option<&SessionView>,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, engine.score(), value);
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "LINES", label);
        fb.put_u32(panel_x, y + 1, engine.lines(), value);
        y = y.saturating_add(3);

        let next = engine.queued();
        fb.put_str(panel_x, y, "NEXT", label);
        fb.put_str(panel_x + 5, y, next.kind().letter(), value);
        y = y.saturating_add(1);
        self.draw_preview(fb, panel_x, y, next);
        y = y.saturating_add(5);

        if let Some(session) = session {
            fb.put_str(panel_x, y, "GAMES", label);
            fb.put_u32(panel_x, y + 1, session.games_played, value);
            y = y.saturating_add(3);

            fb.put_str(panel_x, y, "LAST", label);
            match session.last_final_score {
                Some(score) => fb.put_u32(panel_x, y + 1, score, value),
                None => fb.put_str(panel_x, y + 1, "-", value),
            }
            y = y.saturating_add(3);
        }

        if engine.soft_drop() {
            fb.put_str(panel_x, y, "SOFT DROP", value);
        }
    }

    /// Draw a piece's current state on a mini grid
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, piece: &Piece) {
        let state = piece.state();
        let height = state.height() as i16;
        let style = CellStyle::new(FALLING, Rgb::new(0, 0, 0));
        for &(dx, dy) in state.offsets.iter() {
            let px = x.saturating_add(dx as u16 * self.cell_w);
            let py = y.saturating_add((height + dy as i16) as u16);
            fb.fill_rect(px, py, self.cell_w, 1, BLOCK_CHAR, style);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
    if w < 2 || h < 2 {
        return;
    }
    let style = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

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
