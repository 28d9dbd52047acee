//! Collaborator contracts - audio and high score persistence
//!
//! Both traits are infallible. An implementation that talks to a device or a
//! file handles its own failures and logs them; nothing it does reaches the
//! simulation.

use crate::types::GameEvent;

/// Receives discrete game events, typically to play a sound.
pub trait AudioSink {
    fn play(&mut self, event: GameEvent);
}

/// Loads and saves the single best score.
pub trait HighScoreStore {
    /// Best score known so far; 0 when nothing usable is stored
    fn load(&mut self) -> u32;

    /// Persist a new best score
    fn save(&mut self, score: u32);
}

/// Audio sink that plays nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _event: GameEvent) {}
}

/// Records every event in arrival order
impl AudioSink for Vec<GameEvent> {
    fn play(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// In-memory store, for headless runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: u32,
    saves: Vec<u32>,
}

impl MemoryStore {
    pub fn new(best: u32) -> Self {
        Self {
            best,
            saves: Vec::new(),
        }
    }

    /// Every score passed to `save`, oldest first
    pub fn saves(&self) -> &[u32] {
        &self.saves
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> u32 {
        self.best
    }

    fn save(&mut self, score: u32) {
        self.best = score;
        self.saves.push(score);
    }
}
