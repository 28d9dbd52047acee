//! Terminal bell as the game's audio sink.
//!
//! Terminals have one sound, so only the notable events ring it.

use std::io::{self, Write};

use log::trace;

use crate::core::AudioSink;
use crate::types::GameEvent;

const BEL: &[u8] = b"\x07";

pub struct TerminalBell<W: Write = io::Stdout> {
    out: W,
    muted: bool,
}

impl TerminalBell {
    pub fn stdout(muted: bool) -> Self {
        Self::new(io::stdout(), muted)
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W, muted: bool) -> Self {
        Self { out, muted }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Events loud enough to ring for
pub fn rings_for(event: GameEvent) -> bool {
    matches!(
        event,
        GameEvent::LineClear { .. } | GameEvent::LevelUp { .. } | GameEvent::GameOver { .. }
    )
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, event: GameEvent) {
        if self.muted || !rings_for(event) {
            return;
        }
        // A failed bell is not worth more than a trace line.
        if let Err(err) = self.out.write_all(BEL).and_then(|_| self.out.flush()) {
            trace!("bell for {} failed: {}", event.as_str(), err);
        }
    }
}
