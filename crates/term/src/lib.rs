//! Terminal front end for the game.
//!
//! A small, game-oriented rendering layer: the view draws a
//! [`GameSnapshot`](crate::core::GameSnapshot) into a framebuffer, and the
//! renderer flushes only what changed since the previous frame. No widget
//! library is involved, which keeps control over the aspect ratio (two
//! columns per cell).

pub mod bell;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use bell::TerminalBell;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_color, AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
