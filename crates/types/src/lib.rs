//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (simulation core, terminal rendering, persistence).
//!
//! # Board Dimensions
//!
//! The well is fixed at the standard size:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame budget (~60 FPS) |
//! | `INITIAL_FALL_MS` | 720 | Gravity interval at level 1 |
//! | `LEVEL_SPEED_STEP_MS` | 65 | Interval reduction per level |
//! | `MIN_FALL_MS` | 60 | Fastest gravity interval |
//! | `LOCK_DELAY_MS` | 500 | Time a grounded piece may still slide |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{PieceKind, Rotation, GameAction, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! let piece = PieceKind::T;
//! assert_eq!(PieceKind::from_code(piece.code()), Some(piece));
//!
//! // Rotation indices wrap modulo 4
//! assert_eq!(Rotation::from_index(5), Rotation::East);
//! assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
//!
//! assert_eq!(GameAction::HardDrop.as_str(), "hardDrop");
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Frame budget in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1
pub const INITIAL_FALL_MS: u32 = 720;

/// Gravity interval reduction applied per level gained
pub const LEVEL_SPEED_STEP_MS: u32 = 65;

/// Fastest gravity interval
pub const MIN_FALL_MS: u32 = 60;

/// Lock delay once a piece is grounded
pub const LOCK_DELAY_MS: u32 = 500;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear scoring table, indexed by rows cleared in one lock.
///
/// Multiplied by the current level.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Points per successful manual soft-drop step
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per row travelled by a hard drop
pub const HARD_DROP_POINTS: u32 = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(INITIAL_FALL_MS, 720);
        assert_eq!(LEVEL_SPEED_STEP_MS, 65);
        assert_eq!(MIN_FALL_MS, 60);
        assert_eq!(LOCK_DELAY_MS, 500);
        assert_eq!(LINES_PER_LEVEL, 10);
    }

    #[test]
    fn rotation_index_wraps() {
        assert_eq!(Rotation::from_index(0), Rotation::North);
        assert_eq!(Rotation::from_index(4), Rotation::North);
        assert_eq!(Rotation::from_index(7), Rotation::West);
        for r in [Rotation::North, Rotation::East, Rotation::South, Rotation::West] {
            assert_eq!(Rotation::from_index(r.index()), r);
            assert_eq!(r.rotate_cw().rotate_ccw(), r);
        }
    }

    #[test]
    fn piece_codes_are_stable() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.code() as usize, i + 1);
            assert_eq!(PieceKind::from_code(kind.code()), Some(*kind));
        }
        assert_eq!(PieceKind::from_code(0), None);
        assert_eq!(PieceKind::from_code(8), None);
    }

    #[test]
    fn event_names() {
        assert_eq!(GameEvent::Move.as_str(), "move");
        assert_eq!(GameEvent::LineClear { lines: 2 }.as_str(), "lineClear");
        assert_eq!(GameEvent::LevelUp { level: 3 }.as_str(), "levelUp");
        assert_eq!(
            GameEvent::GameOver {
                score: 10,
                new_high_score: false
            }
            .as_str(),
            "gameOver"
        );
    }
}

/// The seven tetromino piece kinds
///
/// The declaration order (I, O, T, S, Z, L, J) is the catalog order; it fixes
/// the cell codes used in snapshots and the uniform draw mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    L,
    J,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::L,
        PieceKind::J,
    ];

    /// Uppercase letter used by the side panel
    pub fn letter(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::L => "L",
            PieceKind::J => "J",
        }
    }

    /// Position in the catalog (0..7)
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Map a catalog position back to a kind, wrapping modulo 7
    pub fn from_index(i: usize) -> Self {
        Self::ALL[i % Self::ALL.len()]
    }

    /// Non-zero cell code used in `u8` board grids (1..=7)
    pub fn code(&self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1..=7 => Some(Self::ALL[code as usize - 1]),
            _ => None,
        }
    }
}

/// Rotation state of a piece
///
/// `North` is the spawn orientation; each clockwise step is a quarter turn.
/// The index of a rotation (0..4) selects the pre-authored shape grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotation index in 0..4
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Build a rotation from any index, taken modulo 4
    pub fn from_index(i: usize) -> Self {
        match i % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Rotate counter-clockwise (-90° or 270°)
    pub fn rotate_ccw(&self) -> Self {
        Self::from_index(self.index() + 3)
    }
}

/// Player intents that can be applied to the session
///
/// The terminal front end maps keys onto these; the core defines no bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (awards soft drop points)
    SoftDrop,
    /// Instantly drop piece to its ghost row and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Bank the current piece (once per piece)
    Hold,
    /// Toggle pause
    Pause,
    /// Start a fresh game
    Restart,
}

impl GameAction {
    /// camelCase name, used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Hold => "hold",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Active,
    Paused,
    GameOver,
}

/// Discrete event emitted by the session for the audio collaborator
/// (and anyone else observing the game).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A horizontal move succeeded
    Move,
    /// A rotation succeeded
    Rotate,
    /// A manual soft-drop step succeeded
    SoftDrop,
    /// A hard drop was performed
    HardDrop,
    /// One lock cleared `lines` rows
    LineClear { lines: u32 },
    /// The level increased to `level`
    LevelUp { level: u32 },
    /// A spawn collided with the stack
    GameOver { score: u32, new_high_score: bool },
}

impl GameEvent {
    /// Stable event name handed to sound mapping and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            GameEvent::Move => "move",
            GameEvent::Rotate => "rotate",
            GameEvent::SoftDrop => "softdrop",
            GameEvent::HardDrop => "harddrop",
            GameEvent::LineClear { .. } => "lineClear",
            GameEvent::LevelUp { .. } => "levelUp",
            GameEvent::GameOver { .. } => "gameOver",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Settled cell of the given kind
pub type Cell = Option<PieceKind>;
