//! Active piece controller - the falling tetromino and its validated moves
//!
//! Every operation checks the candidate placement against the board first and
//! only then commits it, so a rejected move or rotation leaves the piece
//! untouched. Rotation has no kick search: a rotation that collides at the
//! current anchor is simply refused.

use crate::board::Board;
use crate::shapes::{cells_of, PieceShape, ShapeGrid};
use crate::types::{PieceKind, Rotation, BOARD_WIDTH};

/// Active falling piece
///
/// `x`/`y` is the top-left origin of the shape grid in board coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

/// Horizontally centred spawn column for a kind at rotation 0.
///
/// `x = floor((width - bounding_width) / 2) - min_col`, using the tightest
/// occupied column range of the spawn grid.
pub fn spawn_x(kind: PieceKind) -> i8 {
    let grid = cells_of(kind, Rotation::North);
    (BOARD_WIDTH as i8 - grid.bounding_width()) / 2 - grid.min_col()
}

/// True when every mino of `grid` placed at (x, y) is free on `board`.
pub fn fits(board: &Board, grid: &ShapeGrid, x: i8, y: i8) -> bool {
    grid.minos()
        .iter()
        .all(|&(dx, dy)| !board.is_occupied(x + dx, y + dy))
}

impl ActivePiece {
    /// Create a piece at its spawn placement: rotation 0, centred, y = 0
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: spawn_x(kind),
            y: 0,
        }
    }

    pub fn grid(&self) -> &'static ShapeGrid {
        cells_of(self.kind, self.rotation)
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        *self.grid().minos()
    }

    /// Absolute board coordinates of the four minos
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Check if the piece fits where it is
    pub fn is_valid(&self, board: &Board) -> bool {
        fits(board, self.grid(), self.x, self.y)
    }

    /// Translate by (dx, dy) if the destination is free.
    ///
    /// A `true` return tells the caller to reset its lock timer.
    pub fn try_move(&mut self, board: &Board, dx: i8, dy: i8) -> bool {
        if !fits(board, self.grid(), self.x + dx, self.y + dy) {
            return false;
        }
        self.x += dx;
        self.y += dy;
        true
    }

    /// Rotate one quarter turn in place if the new state fits at the current anchor.
    ///
    /// A `true` return tells the caller to reset its lock timer.
    pub fn try_rotate(&mut self, board: &Board, clockwise: bool) -> bool {
        let next = if clockwise {
            self.rotation.rotate_cw()
        } else {
            self.rotation.rotate_ccw()
        };
        if !fits(board, cells_of(self.kind, next), self.x, self.y) {
            return false;
        }
        self.rotation = next;
        true
    }

    /// Row the piece would land on if dropped straight down from (x, y)
    pub fn ghost_y_from(&self, board: &Board, x: i8, y: i8) -> i8 {
        let grid = self.grid();
        let mut gy = y;
        while fits(board, grid, x, gy + 1) {
            gy += 1;
        }
        gy
    }

    /// Landing row from the current placement
    pub fn ghost_y(&self, board: &Board) -> i8 {
        self.ghost_y_from(board, self.x, self.y)
    }

    /// Check if the piece is resting on the floor or the stack
    pub fn is_grounded(&self, board: &Board) -> bool {
        !fits(board, self.grid(), self.x, self.y + 1)
    }
}
