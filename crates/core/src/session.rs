//! Game session state machine
//!
//! Owns the board, the falling piece, hold and next slots, the counters and
//! both timers. One call to [`GameSession::tick`] per frame advances gravity and
//! lock delay; intents for the frame go through [`GameSession::apply_action`]
//! first. Anything the outside world may want to react to is queued as a
//! [`GameEvent`] and handed out by [`GameSession::drain_events`].

use log::{debug, info};

use crate::board::Board;
use crate::lock::{lock_piece, LockDelay, LockState, Progress};
use crate::piece::ActivePiece;
use crate::rng::PieceRng;
use crate::scoring::calculate_drop_score;
use crate::snapshot::{ActiveSnapshot, GameSnapshot, TimersSnapshot};
use crate::types::{GameAction, GameEvent, Phase, PieceKind};

/// Complete state of one game
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    active: ActivePiece,
    hold: Option<PieceKind>,
    can_hold: bool,
    next: PieceKind,
    rng: PieceRng,
    progress: Progress,
    high_score: u32,
    fall_timer_ms: u32,
    lock_delay: LockDelay,
    phase: Phase,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Create a new game with the given seed and no known high score
    pub fn new(seed: u64) -> Self {
        Self::with_high_score(seed, 0)
    }

    /// Create a new game that starts from a previously stored high score
    pub fn with_high_score(seed: u64, high_score: u32) -> Self {
        Self::from_rng(PieceRng::new(seed), high_score, Vec::new())
    }

    fn from_rng(mut rng: PieceRng, high_score: u32, events: Vec<GameEvent>) -> Self {
        // The first piece spawns into an empty well, so it always fits.
        let first = rng.draw();
        let next = rng.draw();
        Self {
            board: Board::new(),
            active: ActivePiece::spawn(first),
            hold: None,
            can_hold: true,
            next,
            rng,
            progress: Progress::new(),
            high_score,
            fall_timer_ms: 0,
            lock_delay: LockDelay::new(),
            phase: Phase::Active,
            events,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The falling piece; `None` once the game is over
    pub fn active(&self) -> Option<ActivePiece> {
        match self.phase {
            Phase::GameOver => None,
            _ => Some(self.active),
        }
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.progress.score
    }

    pub fn level(&self) -> u32 {
        self.progress.level
    }

    pub fn lines(&self) -> u32 {
        self.progress.lines
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.progress.fall_interval_ms
    }

    pub fn fall_timer_ms(&self) -> u32 {
        self.fall_timer_ms
    }

    pub fn lock_timer_ms(&self) -> u32 {
        self.lock_delay.elapsed_ms()
    }

    /// Landing row of the falling piece
    pub fn ghost_y(&self) -> Option<i8> {
        self.active().map(|p| p.ghost_y(&self.board))
    }

    pub fn is_grounded(&self) -> bool {
        self.active.is_grounded(&self.board)
    }

    /// Events queued since the last drain, oldest first
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Apply one player intent.
    ///
    /// Returns whether the intent changed anything. Rejected intents leave the
    /// session untouched and emit nothing.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match self.phase {
            Phase::GameOver => match action {
                GameAction::Restart => self.restart(),
                _ => false,
            },
            Phase::Paused => match action {
                GameAction::Pause => {
                    self.phase = Phase::Active;
                    true
                }
                _ => false,
            },
            Phase::Active => match action {
                GameAction::MoveLeft => self.shift(-1),
                GameAction::MoveRight => self.shift(1),
                GameAction::SoftDrop => self.soft_drop(),
                GameAction::HardDrop => {
                    self.hard_drop();
                    true
                }
                GameAction::RotateCw => self.rotate(true),
                GameAction::RotateCcw => self.rotate(false),
                GameAction::Hold => self.hold(),
                GameAction::Pause => {
                    self.phase = Phase::Paused;
                    true
                }
                GameAction::Restart => self.restart(),
            },
        }
    }

    /// Advance gravity and lock delay by `elapsed_ms`.
    ///
    /// Returns true when the active piece locked during this tick.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.phase != Phase::Active {
            return false;
        }

        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
        if self.fall_timer_ms >= self.progress.fall_interval_ms {
            self.fall_timer_ms = 0;
            if self.active.try_move(&self.board, 0, 1) {
                self.lock_delay.reset();
            }
        }

        let grounded = self.active.is_grounded(&self.board);
        match self.lock_delay.advance(grounded, elapsed_ms) {
            LockState::Locked => {
                self.lock_active();
                true
            }
            LockState::Falling | LockState::Grounded => false,
        }
    }

    fn shift(&mut self, dx: i8) -> bool {
        if !self.active.try_move(&self.board, dx, 0) {
            return false;
        }
        self.lock_delay.reset();
        self.events.push(GameEvent::Move);
        true
    }

    fn rotate(&mut self, clockwise: bool) -> bool {
        if !self.active.try_rotate(&self.board, clockwise) {
            return false;
        }
        self.lock_delay.reset();
        self.events.push(GameEvent::Rotate);
        true
    }

    /// One manual step down, worth one point
    fn soft_drop(&mut self) -> bool {
        if !self.active.try_move(&self.board, 0, 1) {
            return false;
        }
        self.progress.add_points(calculate_drop_score(1, false));
        self.lock_delay.reset();
        self.events.push(GameEvent::SoftDrop);
        true
    }

    /// Drop to the ghost row and lock at once. Returns the drop points.
    fn hard_drop(&mut self) -> u32 {
        let landing = self.active.ghost_y(&self.board);
        let distance = (landing - self.active.y).max(0) as u32;
        self.active.y = landing;

        let points = calculate_drop_score(distance, true);
        self.progress.add_points(points);
        self.fall_timer_ms = 0;
        self.events.push(GameEvent::HardDrop);

        self.lock_active();
        points
    }

    /// Swap the falling piece into the hold slot
    fn hold(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }

        let current = self.active.kind;
        let incoming = match self.hold.replace(current) {
            Some(held) => held,
            None => self.take_next(),
        };
        debug!("hold {}, bring in {}", current.letter(), incoming.letter());

        self.can_hold = false;
        self.spawn(incoming);
        true
    }

    fn restart(&mut self) -> bool {
        let rng = std::mem::take(&mut self.rng);
        let events = std::mem::take(&mut self.events);
        *self = Self::from_rng(rng, self.high_score, events);
        info!("new game (high score {})", self.high_score);
        true
    }

    fn take_next(&mut self) -> PieceKind {
        std::mem::replace(&mut self.next, self.rng.draw())
    }

    /// Place a fresh piece of `kind`, ending the game if it does not fit.
    fn spawn(&mut self, kind: PieceKind) {
        self.active = ActivePiece::spawn(kind);
        self.lock_delay.reset();
        if !self.active.is_valid(&self.board) {
            self.end_game();
        }
    }

    fn lock_active(&mut self) {
        let outcome = lock_piece(&mut self.board, &self.active, &mut self.progress);

        let lines = outcome.lines_cleared();
        if lines > 0 {
            self.events.push(GameEvent::LineClear { lines });
        }
        if let Some(level) = outcome.level_up {
            self.events.push(GameEvent::LevelUp { level });
        }

        let kind = self.take_next();
        self.can_hold = true;
        self.spawn(kind);
    }

    fn end_game(&mut self) {
        self.phase = Phase::GameOver;
        let score = self.progress.score;
        let new_high_score = score > self.high_score;
        if new_high_score {
            self.high_score = score;
        }
        info!(
            "game over: score {}, level {}, lines {}{}",
            score,
            self.progress.level,
            self.progress.lines,
            if new_high_score { " (new high score)" } else { "" }
        );
        self.events.push(GameEvent::GameOver {
            score,
            new_high_score,
        });
    }

    /// Fill an existing snapshot without allocating
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.active = self.active().map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.hold = self.hold;
        out.next = self.next;
        out.can_hold = self.can_hold;
        out.phase = self.phase;
        out.score = self.progress.score;
        out.high_score = self.high_score;
        out.level = self.progress.level;
        out.lines = self.progress.lines;
        out.timers = TimersSnapshot {
            fall_ms: self.fall_timer_ms,
            fall_interval_ms: self.progress.fall_interval_ms,
            lock_ms: self.lock_delay.elapsed_ms(),
        };
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1)
    }
}
