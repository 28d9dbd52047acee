//! Terminal input (engine-facing).
//!
//! Independent of any UI framework: maps `crossterm` key presses to
//! [`crate::types::GameAction`] and collects them per frame. Quit is an input
//! concern and never reaches the game core.

pub mod map;
pub mod queue;

pub use blockfall_types as types;

pub use map::{classify, handle_key_event, should_quit, KeyIntent};
pub use queue::{ActionQueue, MAX_ACTIONS_PER_FRAME};
