//! Frame driver - one session wired to its audio and persistence collaborators
//!
//! Front ends call [`Driver::step`] once per frame with the intents collected
//! since the previous frame and the real elapsed time.

use log::{info, trace};

use crate::collab::{AudioSink, HighScoreStore};
use crate::session::GameSession;
use crate::snapshot::GameSnapshot;
use crate::types::{GameAction, GameEvent};

pub struct Driver<A, S> {
    session: GameSession,
    audio: A,
    store: S,
}

impl<A: AudioSink, S: HighScoreStore> Driver<A, S> {
    /// Start a game, seeding the high score from `store`
    pub fn new(seed: u64, audio: A, mut store: S) -> Self {
        let high_score = store.load();
        info!("starting with seed {} and high score {}", seed, high_score);
        Self {
            session: GameSession::with_high_score(seed, high_score),
            audio,
            store,
        }
    }

    /// Apply `actions` in order, then advance timers by `elapsed_ms`.
    ///
    /// Returns the number of events dispatched this frame.
    pub fn step(&mut self, actions: &[GameAction], elapsed_ms: u32) -> usize {
        for &action in actions {
            let applied = self.session.apply_action(action);
            trace!("{} -> {}", action.as_str(), applied);
        }
        self.session.tick(elapsed_ms);
        self.dispatch()
    }

    fn dispatch(&mut self) -> usize {
        let mut count = 0;
        for event in self.session.drain_events() {
            if let GameEvent::GameOver {
                score,
                new_high_score: true,
            } = event
            {
                info!("saving new high score {}", score);
                self.store.save(score);
            }
            self.audio.play(event);
            count += 1;
        }
        count
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.session.snapshot_into(out);
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
