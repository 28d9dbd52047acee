//! Terminal output - raw mode, alternate screen and incremental flushes
//!
//! A frame is written in full the first time, after a resize or
//! [`invalidate`](TerminalRenderer::invalidate), and whenever the game phase
//! changes so the pause and game-over overlays never leave stale cells.
//! Otherwise only the changed spans of each row go out.

use std::io::{self, Write};
use std::ops::Range;

use anyhow::{Context, Result};
use log::{debug, trace};

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::Phase;

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        }
    }
}

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    last: Option<FrameBuffer>,
    last_phase: Option<Phase>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            last: None,
            last_phase: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        debug!("terminal entered");
        Ok(())
    }

    /// Undo [`enter`](Self::enter). Safe to call on any exit path.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(ResetColor)?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode().context("disable raw mode")?;
        debug!("terminal restored");
        Ok(())
    }

    /// Force the next draw to be a full redraw, e.g. after a resize event.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `fb` for a session in `phase`, then swap it with the previous frame.
    ///
    /// The caller gets the older buffer back to render the next frame into, so
    /// frames are never cloned.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer, phase: Phase) -> Result<()> {
        if self.last_phase.replace(phase) != Some(phase) {
            trace!("phase {:?}, redrawing everything", phase);
            self.last = None;
        }

        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                let cells = encode_diff_into(&prev, fb, &mut self.buf)?;
                trace!("{} cells changed", cells);
                prev
            }
            stale => {
                encode_full_into(fb, &mut self.buf)?;
                debug!("full frame {}x{}", fb.width(), fb.height());
                stale.unwrap_or_else(|| FrameBuffer::new(0, 0))
            }
        };
        if !self.buf.is_empty() {
            self.flush_buf()?;
        }

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out
            .write_all(&self.buf)
            .context("write frame to terminal")?;
        self.out.flush().context("flush terminal")?;
        Ok(())
    }
}

/// Clear the screen and write every cell of `fb` into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen::default();
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        pen.write(out, fb.row(y))?;
    }
    pen.finish(out)
}

/// Write the cells of `next` that differ from `prev` into `out`.
///
/// Falls back to a full frame when the sizes differ. Returns the number of
/// cells written.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<usize> {
    if prev.width() != next.width() || prev.height() != next.height() {
        encode_full_into(next, out)?;
        return Ok(next.cells().len());
    }

    let mut pen = Pen::default();
    let mut written = 0;
    for y in 0..next.height() {
        let row = next.row(y);
        for span in changed_spans(prev.row(y), row) {
            out.queue(cursor::MoveTo(span.start as u16, y))?;
            written += span.len();
            pen.write(out, &row[span])?;
        }
    }
    pen.finish(out)?;
    Ok(written)
}

/// Style the terminal is left in while a frame is encoded.
#[derive(Default)]
struct Pen {
    current: Option<CellStyle>,
}

impl Pen {
    fn set(&mut self, out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
        match self.current {
            Some(cur) if cur == style => return Ok(()),
            Some(cur) if cur.bold == style.bold && cur.dim == style.dim => {
                if cur.fg != style.fg {
                    out.queue(SetForegroundColor(style.fg.into()))?;
                }
                if cur.bg != style.bg {
                    out.queue(SetBackgroundColor(style.bg.into()))?;
                }
            }
            _ => {
                // SGR reset drops both colors too.
                out.queue(SetAttribute(Attribute::Reset))?;
                if style.bold {
                    out.queue(SetAttribute(Attribute::Bold))?;
                }
                if style.dim {
                    out.queue(SetAttribute(Attribute::Dim))?;
                }
                out.queue(SetForegroundColor(style.fg.into()))?;
                out.queue(SetBackgroundColor(style.bg.into()))?;
            }
        }
        self.current = Some(style);
        Ok(())
    }

    fn write(&mut self, out: &mut Vec<u8>, cells: &[Cell]) -> Result<()> {
        for cell in cells {
            self.set(out, cell.style)?;
            out.queue(Print(cell.ch))?;
        }
        Ok(())
    }

    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        if self.current.is_some() {
            out.queue(SetAttribute(Attribute::Reset))?;
            out.queue(ResetColor)?;
        }
        Ok(())
    }
}

/// Maximal column ranges where `after` differs from `before`
fn changed_spans<'a>(before: &'a [Cell], after: &'a [Cell]) -> ChangedSpans<'a> {
    ChangedSpans {
        before,
        after,
        pos: 0,
    }
}

struct ChangedSpans<'a> {
    before: &'a [Cell],
    after: &'a [Cell],
    pos: usize,
}

impl Iterator for ChangedSpans<'_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Range<usize>> {
        let (before, after) = (self.before, self.after);
        let len = after.len();
        let differs = |x: usize| before.get(x) != after.get(x);

        let start = (self.pos..len).find(|&x| differs(x))?;
        let end = (start..len).find(|&x| !differs(x)).unwrap_or(len);
        self.pos = end;
        Some(start..end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAR_ALL: &str = "\x1b[2J";

    fn renderer() -> TerminalRenderer<Vec<u8>> {
        TerminalRenderer::with_writer(Vec::new())
    }

    fn line(text: &str) -> FrameBuffer {
        let mut fb = FrameBuffer::new(text.len() as u16, 1);
        fb.put_str(0, 0, text, CellStyle::default());
        fb
    }

    fn take_output(r: &mut TerminalRenderer<Vec<u8>>) -> String {
        String::from_utf8_lossy(&std::mem::take(&mut r.out)).into_owned()
    }

    #[test]
    fn first_frame_is_full() {
        let mut r = renderer();
        r.draw_swap(&mut line("AB"), Phase::Active).unwrap();
        let out = take_output(&mut r);
        assert!(out.contains(CLEAR_ALL));
        assert!(out.contains("AB"));
    }

    #[test]
    fn unchanged_frame_writes_nothing() {
        let mut r = renderer();
        r.draw_swap(&mut line("AB"), Phase::Active).unwrap();
        take_output(&mut r);

        r.draw_swap(&mut line("AB"), Phase::Active).unwrap();
        assert!(take_output(&mut r).is_empty());
    }

    #[test]
    fn only_changed_cells_are_written() {
        let mut r = renderer();
        r.draw_swap(&mut line("ABCD"), Phase::Active).unwrap();
        take_output(&mut r);

        r.draw_swap(&mut line("AXCD"), Phase::Active).unwrap();
        let out = take_output(&mut r);
        assert!(!out.contains(CLEAR_ALL));
        assert!(out.contains("\x1b[1;2H"));
        assert!(out.contains('X'));
        assert!(!out.contains('A'));
        assert!(!out.contains('C'));
    }

    #[test]
    fn phase_change_forces_full_redraw() {
        let mut r = renderer();
        r.draw_swap(&mut line("AB"), Phase::Active).unwrap();
        take_output(&mut r);

        r.draw_swap(&mut line("AB"), Phase::Paused).unwrap();
        assert!(take_output(&mut r).contains(CLEAR_ALL));

        r.draw_swap(&mut line("AB"), Phase::Paused).unwrap();
        assert!(take_output(&mut r).is_empty());

        r.draw_swap(&mut line("AB"), Phase::GameOver).unwrap();
        assert!(take_output(&mut r).contains(CLEAR_ALL));
    }

    #[test]
    fn invalidate_and_resize_force_full_redraw() {
        let mut r = renderer();
        r.draw_swap(&mut line("AB"), Phase::Active).unwrap();
        take_output(&mut r);

        r.invalidate();
        r.draw_swap(&mut line("AB"), Phase::Active).unwrap();
        assert!(take_output(&mut r).contains(CLEAR_ALL));

        r.draw_swap(&mut line("ABC"), Phase::Active).unwrap();
        assert!(take_output(&mut r).contains(CLEAR_ALL));
    }

    #[test]
    fn spans_cover_each_changed_run() {
        let before = line("abcdef");
        let after = line("aXYdeZ");
        let spans: Vec<_> = changed_spans(before.row(0), after.row(0)).collect();
        assert_eq!(spans, vec![1..3, 5..6]);

        let same: Vec<_> = changed_spans(before.row(0), before.row(0)).collect();
        assert!(same.is_empty());
    }

    #[test]
    fn diff_counts_written_cells() {
        let mut out = Vec::new();
        let n = encode_diff_into(&line("abcdef"), &line("aXYdeZ"), &mut out).unwrap();
        assert_eq!(n, 3);
    }

    #[test]
    fn repeated_style_is_set_once() {
        let red = CellStyle::new(Rgb::new(255, 0, 0), Rgb::new(0, 0, 0));
        let mut fb = FrameBuffer::new(3, 1);
        fb.put_str(0, 0, "abc", red);

        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert_eq!(text.matches("38;2;255;0;0").count(), 1);
        assert!(text.contains("abc"));
    }

    #[test]
    fn attribute_change_reapplies_colors() {
        let plain = CellStyle::default();
        let mut fb = FrameBuffer::new(2, 1);
        fb.put_char(0, 0, 'a', plain);
        fb.put_char(1, 0, 'b', plain.bold());

        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert_eq!(text.matches("38;2;220;220;220").count(), 2);
    }

    #[test]
    fn rgb_maps_to_truecolor() {
        assert_eq!(Color::from(Rgb::new(1, 2, 3)), Color::Rgb { r: 1, g: 2, b: 3 });
    }
}
