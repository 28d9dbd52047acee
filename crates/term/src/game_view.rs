//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested.

use crate::core::{color_of, get_shape, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

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

/// Lays out the well, the side panel and the overlays.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 makes cells look roughly square in most terminal fonts.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Frame origin (top-left border corner) for a viewport.
    pub fn frame_origin(&self, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size();
        let x = viewport.width.saturating_sub(frame_w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        (x, y)
    }

    /// Border-inclusive size of the well.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    /// Render into an existing framebuffer.
    ///
    /// Reuse one framebuffer across frames; it is only reallocated when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let (start_x, start_y) = self.frame_origin(viewport);

        let bg = CellStyle::new(Rgb::new(80, 80, 90), WELL_BG);
        let border = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            bg,
        );
        draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        for (y, row) in snap.board.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                match PieceKind::from_code(code) {
                    Some(kind) => self.draw_block(fb, start_x, start_y, x as u16, y as u16, kind),
                    None => self.draw_empty_cell(fb, start_x, start_y, x as u16, y as u16),
                }
            }
        }

        if let (Some(active), Some(ghost_y)) = (snap.active, snap.ghost_y) {
            let ghost = CellStyle::new(Rgb::new(140, 140, 140), WELL_BG).dim();
            for (x, y) in visible_cells(active.kind, active.rotation, active.x, ghost_y) {
                self.fill_cell_rect(fb, start_x, start_y, x, y, '░', ghost);
            }
        }

        if let Some(active) = snap.active {
            for (x, y) in visible_cells(active.kind, active.rotation, active.x, active.y) {
                self.draw_block(fb, start_x, start_y, x, y, active.kind);
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);

        if snap.paused() {
            draw_overlay(fb, start_x, start_y, frame_w, frame_h, &["PAUSED", "P to resume"]);
        } else if snap.game_over() {
            draw_overlay(fb, start_x, start_y, frame_w, frame_h, &["GAME OVER", "R to restart"]);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), WELL_BG).dim();
        self.fill_cell_rect(fb, start_x, start_y, x, y, '·', style);
    }

    fn draw_block(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        kind: PieceKind,
    ) {
        let style = CellStyle::new(piece_color(kind), WELL_BG).bold();
        self.fill_cell_rect(fb, start_x, start_y, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
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
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut y = start_y;
        fb.put_str(panel_x, y, "HOLD", label);
        if let Some(kind) = snap.hold {
            draw_preview(fb, panel_x, y + 1, kind, !snap.can_hold);
        }
        y = y.saturating_add(4);

        fb.put_str(panel_x, y, "NEXT", label);
        draw_preview(fb, panel_x, y + 1, snap.next, false);
        y = y.saturating_add(4);

        for (name, number) in [
            ("SCORE", snap.score),
            ("BEST", snap.high_score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, number, value);
            y = y.saturating_add(3);
        }

        let hint = value.dim();
        fb.put_str(panel_x, y, "P pause", hint);
        fb.put_str(panel_x, y + 1, "R restart", hint);
        fb.put_str(panel_x, y + 2, "Q quit", hint);
    }
}

/// On-screen board cells of a piece placed at (x, y); rows above the well are skipped.
fn visible_cells(kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> impl Iterator<Item = (u16, u16)> {
    get_shape(kind, rotation)
        .into_iter()
        .map(move |(dx, dy)| (x + dx, y + dy))
        .filter(|&(cx, cy)| {
            (0..BOARD_WIDTH as i8).contains(&cx) && (0..BOARD_HEIGHT as i8).contains(&cy)
        })
        .map(|(cx, cy)| (cx as u16, cy as u16))
}

/// Spawn-orientation thumbnail, two columns per mino, top row trimmed.
fn draw_preview(fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind, greyed: bool) {
    let shape = get_shape(kind, Rotation::North);
    let top = shape.iter().map(|&(_, dy)| dy).min().unwrap_or(0);
    let style = if greyed {
        CellStyle::new(Rgb::new(110, 110, 110), SCREEN_BG).dim()
    } else {
        CellStyle::new(piece_color(kind), SCREEN_BG)
    };
    for (dx, dy) in shape {
        let px = x + dx as u16 * 2;
        let py = y + (dy - top) as u16;
        fb.fill_rect(px, py, 2, 1, '█', style);
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
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

/// Centred lines over the well, first line bold.
fn draw_overlay(
    fb: &mut FrameBuffer,
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
    lines: &[&str],
) {
    let title = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
    let sub = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
    let mid_y = start_y.saturating_add(frame_h / 2);
    for (i, text) in lines.iter().enumerate() {
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = if i == 0 { title } else { sub };
        fb.put_str(x, mid_y + i as u16, text, style);
    }
}

pub fn piece_color(kind: PieceKind) -> Rgb {
    Rgb::from(color_of(kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_is_centred() {
        let view = GameView::default();
        assert_eq!(view.frame_size(), (22, 22));
        assert_eq!(view.frame_origin(Viewport::new(80, 24)), (29, 1));
        let top = GameView::default().with_anchor_y(AnchorY::Top);
        assert_eq!(top.frame_origin(Viewport::new(80, 40)), (29, 0));
    }

    #[test]
    fn test_visible_cells_skip_rows_above_well() {
        let cells: Vec<_> = visible_cells(PieceKind::I, Rotation::East, 0, -2).collect();
        assert_eq!(cells, vec![(2, 0), (2, 1)]);
    }

    #[test]
    fn test_preview_trims_empty_top_row() {
        let mut fb = FrameBuffer::new(10, 3);
        draw_preview(&mut fb, 0, 0, PieceKind::I, false);
        assert_eq!(fb.row_text(0), "████████  ");
        assert_eq!(fb.row_text(1).trim(), "");
    }
}
