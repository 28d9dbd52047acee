//! Snapshot - plain-data view of a session for renderers
//!
//! Copying into a caller-owned [`GameSnapshot`] each frame keeps the renderer
//! free of borrows into the session.

use crate::piece::ActivePiece;
use crate::types::{PieceKind, Phase, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

/// Falling piece by kind, rotation and anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

/// Gravity and lock delay timers, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimersSnapshot {
    pub fall_ms: u32,
    pub fall_interval_ms: u32,
    pub lock_ms: u32,
}

/// Read-only copy of everything the renderer draws in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Settled cells as kind codes, 0 = empty
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    /// Falling piece; `None` once the game is over
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub hold: Option<PieceKind>,
    pub next: PieceKind,
    pub can_hold: bool,
    pub phase: Phase,
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub lines: u32,
    pub timers: TimersSnapshot,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.phase == Phase::Active
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            hold: None,
            next: PieceKind::I,
            can_hold: true,
            phase: Phase::Active,
            score: 0,
            high_score: 0,
            level: 1,
            lines: 0,
            timers: TimersSnapshot {
                fall_ms: 0,
                fall_interval_ms: 0,
                lock_ms: 0,
            },
        }
    }
}
