//! GameView: maps a `core::GameRound` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! The field is pixel-based with y growing upward; the terminal is row-based
//! with y growing downward. Each block maps to a `cell_w` x `cell_h` group of
//! terminal cells, and a packet's pixel y is floored to the block row it
//! currently occupies.

use crate::core::round::RoundPhase;
use crate::core::{GameRound, Packet};
use crate::term::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::BLOCK_SIDE;

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

const PACKET_COLORS: [Rgb; 6] = [
    Rgb::new(80, 220, 220),
    Rgb::new(240, 220, 80),
    Rgb::new(200, 120, 220),
    Rgb::new(100, 220, 120),
    Rgb::new(80, 120, 220),
    Rgb::new(255, 165, 0),
];

/// A lightweight terminal renderer for a packet round.
pub struct GameView {
    /// Block width in terminal columns.
    cell_w: u16,
    /// Block height in terminal rows.
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

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Render the current round into a framebuffer.
    pub fn render(&self, round: &GameRound, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let field = round.field();
        let cols = field.width_blocks() as u16;
        // Rows cover the span from the floor up to the spawn height, so
        // packets are visible while easing into the field.
        let rows = ((field.spawn_y() - field.floor_y() + BLOCK_SIDE - 1) / BLOCK_SIDE) as u16;

        let field_w = cols * self.cell_w;
        let field_h = rows * self.cell_h;
        let frame_w = field_w + 2;
        let frame_h = field_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let bg = CellStyle {
            fg: Rgb::new(80, 80, 90),
            bg: Rgb::new(30, 30, 40),
            bold: false,
            dim: false,
        };
        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        fb.fill_rect(start_x + 1, start_y + 1, field_w, field_h, ' ', bg);
        self.draw_border(&mut fb, start_x, start_y, frame_w, frame_h, border);
        self.draw_ceiling_marker(&mut fb, round, start_x, start_y, rows, field_w);

        for (i, packet) in round.landed().iter().enumerate() {
            let style = if packet.marked() {
                CellStyle {
                    fg: Rgb::new(230, 60, 60),
                    bg: bg.bg,
                    bold: true,
                    dim: false,
                }
            } else {
                CellStyle {
                    fg: PACKET_COLORS[i % PACKET_COLORS.len()],
                    bg: bg.bg,
                    bold: false,
                    dim: false,
                }
            };
            self.draw_packet(&mut fb, round, packet, style, start_x, start_y, rows);
        }

        if let Some(active) = round.active() {
            let style = CellStyle {
                fg: Rgb::new(240, 240, 240),
                bg: bg.bg,
                bold: true,
                dim: false,
            };
            self.draw_packet(&mut fb, round, active, style, start_x, start_y, rows);
        }

        self.draw_popups(&mut fb, round, start_x, start_y, rows);
        self.draw_side_panel(&mut fb, round, viewport, start_x, start_y, frame_w);

        match round.phase() {
            RoundPhase::Waiting => {
                self.draw_overlay_text(&mut fb, start_x, start_y, frame_w, frame_h, "GET READY")
            }
            RoundPhase::GameOver => {
                self.draw_overlay_text(&mut fb, start_x, start_y, frame_w, frame_h, "GAME OVER")
            }
            RoundPhase::Falling => {}
        }

        fb
    }

    /// Terminal row of the block row `row` (counted upward from the floor).
    fn term_row(&self, start_y: u16, rows: u16, row: i32) -> Option<u16> {
        if row < 0 || row >= rows as i32 {
            return None;
        }
        Some(start_y + 1 + (rows - 1 - row as u16) * self.cell_h)
    }

    fn draw_packet(
        &self,
        fb: &mut FrameBuffer,
        round: &GameRound,
        packet: &Packet,
        style: CellStyle,
        start_x: u16,
        start_y: u16,
        rows: u16,
    ) {
        let floor = round.field().floor_y();
        let shape = packet.shape();
        for cy in 0..shape.height() as i32 {
            for cx in 0..shape.width() as i32 {
                if !shape.occupied(cx, cy) {
                    continue;
                }
                let row = (packet.y() + cy * BLOCK_SIDE - floor).div_euclid(BLOCK_SIDE);
                let Some(ty) = self.term_row(start_y, rows, row) else {
                    continue;
                };
                let tx = start_x + 1 + (packet.x() + cx) as u16 * self.cell_w;
                fb.fill_rect(tx, ty, self.cell_w, self.cell_h, '█', style);
            }
        }
    }

    /// Dashed line at the block row containing the top usable boundary.
    fn draw_ceiling_marker(
        &self,
        fb: &mut FrameBuffer,
        round: &GameRound,
        start_x: u16,
        start_y: u16,
        rows: u16,
        field_w: u16,
    ) {
        let field = round.field();
        let row = (field.ceiling_y() - field.floor_y()) / BLOCK_SIDE;
        if let Some(ty) = self.term_row(start_y, rows, row) {
            let style = CellStyle {
                fg: Rgb::new(120, 80, 80),
                bg: Rgb::new(30, 30, 40),
                bold: false,
                dim: true,
            };
            for dx in 0..field_w {
                fb.put_char(start_x + 1 + dx, ty, '┄', style);
            }
        }
    }

    fn draw_popups(
        &self,
        fb: &mut FrameBuffer,
        round: &GameRound,
        start_x: u16,
        start_y: u16,
        rows: u16,
    ) {
        let floor = round.field().floor_y();
        for popup in round.popups() {
            let row = (popup.display_y() - floor).div_euclid(BLOCK_SIDE);
            let Some(ty) = self.term_row(start_y, rows, row) else {
                continue;
            };
            let tx = start_x + 1 + (popup.x.max(0) as u16 * self.cell_w) / BLOCK_SIDE as u16;
            let style = CellStyle {
                fg: Rgb::new(250, 250, 160),
                bg: Rgb::new(30, 30, 40),
                bold: true,
                dim: popup.opacity() < 0.4,
            };
            fb.put_str(tx, ty, &format!("+{}", popup.text), style);
        }
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

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        round: &GameRound,
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
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let value = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        let mut y = start_y;
        fb.put_str(panel_x, y, "MODE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, round.mode().as_str(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &format!("{}", round.score()), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "BEST", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &format!("{}", round.best()), value);
        y = y.saturating_add(2);

        if let Some(result) = round.result() {
            if result.new_best {
                fb.put_str(panel_x, y, "NEW BEST!", label);
                y = y.saturating_add(2);
            }
            fb.put_str(panel_x, y, "r restart", CellStyle { dim: true, ..value });
            y = y.saturating_add(1);
            fb.put_str(panel_x, y, "q quit", CellStyle { dim: true, ..value });
        } else {
            fb.put_str(
                panel_x,
                y,
                "←/→ move  ↑/z rotate",
                CellStyle { dim: true, ..value },
            );
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
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        fb.put_str(x, mid_y, text, style);
    }
}
