//! Core game logic - pure, deterministic, and testable
//!
//! Everything the falling-block game decides lives here: the shape catalog,
//! the well, the falling piece, lock delay and line clears, scoring, and the
//! session state machine that sequences them. Nothing in this crate touches
//! the terminal, the file system or the clock; elapsed time is passed in.
//!
//! # Module Structure
//!
//! - [`shapes`]: seven tetrominoes, four pre-authored rotation grids each
//! - [`board`]: 10x20 well with collision queries and row compaction
//! - [`piece`]: the active piece and its validated moves (no wall kicks)
//! - [`lock`]: lock delay and the lock/clear/score step
//! - [`scoring`]: line and drop points, level and gravity curve
//! - [`rng`]: seeded, uniform next-piece draws
//! - [`session`]: phases, hold, next slot, timers and events
//! - [`snapshot`]: plain-data copy for renderers
//! - [`collab`]: audio and high score collaborator traits
//! - [`driver`]: one frame of intents + tick, events routed to collaborators
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameSession;
//! use blockfall_core::types::GameAction;
//!
//! let mut game = GameSession::new(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! // Hard drop awards two points per row travelled.
//! assert!(game.score() > 0);
//! ```
//!
//! # Timing
//!
//! - Gravity starts at 720ms per row and speeds up by 65ms per level, floored at 60ms.
//! - A grounded piece locks after 500ms without a successful move or rotation.
//!
//! Call [`GameSession::tick`](session::GameSession::tick) every frame with the elapsed time.

pub mod board;
pub mod collab;
pub mod driver;
pub mod lock;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod shapes;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collab::{AudioSink, HighScoreStore, MemoryStore, Silent};
pub use driver::Driver;
pub use lock::{LockDelay, LockOutcome, LockState, Progress};
pub use piece::ActivePiece;
pub use rng::PieceRng;
pub use scoring::{calculate_drop_score, calculate_line_score, fall_interval_ms, level_for_lines};
pub use session::GameSession;
pub use shapes::{cells_of, color_of, get_shape, ShapeGrid};
pub use snapshot::{ActiveSnapshot, GameSnapshot, TimersSnapshot};
