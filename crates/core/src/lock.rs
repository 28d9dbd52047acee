//! Lock & line-clear engine
//!
//! A piece goes `Falling -> Grounded -> Locked`. While grounded the lock delay
//! accumulates frame time; the session resets it whenever the piece moves,
//! rotates or is pulled down by gravity. Locking merges the piece into the
//! board, clears full rows and settles score, lines, level and gravity.

use log::debug;

use crate::board::{Board, ClearedRows};
use crate::piece::ActivePiece;
use crate::scoring::{calculate_line_score, fall_interval_ms, level_for_lines};
use crate::types::{INITIAL_FALL_MS, LOCK_DELAY_MS};

/// Where a piece is in its lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Falling,
    Grounded,
    Locked,
}

/// Lock delay timer for the active piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockDelay {
    timer_ms: u32,
}

impl LockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.timer_ms
    }

    pub fn reset(&mut self) {
        self.timer_ms = 0;
    }

    /// Advance the timer by one frame.
    ///
    /// The timer only runs while `grounded`; an airborne piece keeps whatever
    /// it had accumulated until something resets it.
    pub fn advance(&mut self, grounded: bool, elapsed_ms: u32) -> LockState {
        if !grounded {
            return LockState::Falling;
        }
        self.timer_ms = self.timer_ms.saturating_add(elapsed_ms);
        if self.timer_ms >= LOCK_DELAY_MS {
            LockState::Locked
        } else {
            LockState::Grounded
        }
    }
}

/// Score, lines, level and gravity for one game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub fall_interval_ms: u32,
}

impl Progress {
    pub fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            lines: 0,
            fall_interval_ms: INITIAL_FALL_MS,
        }
    }

    pub fn add_points(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Book `lines` cleared by one lock.
    ///
    /// Points use the level before the lines are counted. Returns the new
    /// level when it went up.
    pub fn record_clear(&mut self, lines: usize) -> (u32, Option<u32>) {
        let points = calculate_line_score(lines, self.level);
        self.add_points(points);
        self.lines = self.lines.saturating_add(lines as u32);

        let new_level = level_for_lines(self.lines);
        if new_level > self.level {
            self.level = new_level;
            self.fall_interval_ms = fall_interval_ms(new_level);
            (points, Some(new_level))
        } else {
            (points, None)
        }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

/// What one lock did to the board and the counters
#[derive(Debug, Clone, PartialEq)]
pub struct LockOutcome {
    /// Cleared row indices, bottom to top
    pub cleared: ClearedRows,
    /// Points awarded for the clear (0 when nothing cleared)
    pub line_score: u32,
    /// New level, if this lock raised it
    pub level_up: Option<u32>,
}

impl LockOutcome {
    pub fn lines_cleared(&self) -> u32 {
        self.cleared.len() as u32
    }
}

/// Merge `piece` into `board` and settle the consequences.
///
/// Minos above the well are dropped by the board; the piece vanishes there
/// instead of ending the game.
pub fn lock_piece(board: &mut Board, piece: &ActivePiece, progress: &mut Progress) -> LockOutcome {
    let cells = piece.cells();
    let written = board.lock_cells(&cells, piece.kind);
    if written < cells.len() {
        debug!(
            "lock {:?} at ({}, {}): {} cell(s) above the well dropped",
            piece.kind,
            piece.x,
            piece.y,
            cells.len() - written
        );
    }

    let cleared = board.clear_full_rows();
    let (line_score, level_up) = progress.record_clear(cleared.len());

    if !cleared.is_empty() {
        debug!(
            "cleared rows {:?} for {} points (level {}, lines {})",
            cleared.as_slice(),
            line_score,
            progress.level,
            progress.lines
        );
    }
    if let Some(level) = level_up {
        debug!(
            "level up to {}, fall interval {}ms",
            level, progress.fall_interval_ms
        );
    }

    LockOutcome {
        cleared,
        line_score,
        level_up,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PieceKind, Rotation, BOARD_WIDTH};

    #[test]
    fn test_lock_delay_runs_only_when_grounded() {
        let mut delay = LockDelay::new();
        assert_eq!(delay.advance(false, 300), LockState::Falling);
        assert_eq!(delay.elapsed_ms(), 0);

        assert_eq!(delay.advance(true, 300), LockState::Grounded);
        assert_eq!(delay.advance(true, 199), LockState::Grounded);
        assert_eq!(delay.advance(true, 1), LockState::Locked);
    }

    #[test]
    fn test_lock_delay_reset() {
        let mut delay = LockDelay::new();
        delay.advance(true, 480);
        delay.reset();
        assert_eq!(delay.advance(true, 480), LockState::Grounded);
    }

    #[test]
    fn test_record_clear_uses_level_before_lines() {
        let mut progress = Progress::new();
        progress.lines = 8;

        let (points, level_up) = progress.record_clear(2);
        assert_eq!(points, 300);
        assert_eq!(level_up, Some(2));
        assert_eq!(progress.level, 2);
        assert_eq!(progress.lines, 10);
        assert_eq!(progress.fall_interval_ms, 655);

        let (points, level_up) = progress.record_clear(1);
        assert_eq!(points, 200);
        assert_eq!(level_up, None);
    }

    #[test]
    fn test_lock_piece_single_line() {
        let mut board = Board::new();
        for x in 0..BOARD_WIDTH as i8 {
            if !(3..=6).contains(&x) {
                board.set(x, 19, Some(PieceKind::Z));
            }
        }
        let piece = ActivePiece {
            kind: PieceKind::I,
            rotation: Rotation::North,
            x: 3,
            y: 18,
        };
        let mut progress = Progress::new();

        let outcome = lock_piece(&mut board, &piece, &mut progress);
        assert_eq!(outcome.lines_cleared(), 1);
        assert_eq!(outcome.line_score, 100);
        assert_eq!(outcome.level_up, None);
        assert_eq!(progress.score, 100);
        assert_eq!(progress.lines, 1);
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn test_lock_piece_partially_above_well() {
        let mut board = Board::new();
        // Vertical I with its top two minos above row 0.
        let piece = ActivePiece {
            kind: PieceKind::I,
            rotation: Rotation::East,
            x: 2,
            y: -2,
        };
        let mut progress = Progress::new();
        let outcome = lock_piece(&mut board, &piece, &mut progress);
        assert_eq!(outcome.lines_cleared(), 0);
        assert_eq!(board.occupied_count(), 2);
        assert!(board.is_occupied(4, 0));
        assert!(board.is_occupied(4, 1));
        assert_eq!(progress.score, 0);
    }
}
