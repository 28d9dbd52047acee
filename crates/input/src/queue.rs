//! Per-frame intent collection.

use std::time::Duration;

use arrayvec::ArrayVec;
use crossterm::event::{self, Event};

use crate::map::{classify, KeyIntent};
use crate::types::GameAction;

/// Upper bound on intents kept for one frame; extra presses are dropped.
pub const MAX_ACTIONS_PER_FRAME: usize = 32;

/// Intents gathered since the last frame, in arrival order
#[derive(Debug, Clone, Default)]
pub struct ActionQueue {
    actions: ArrayVec<GameAction, MAX_ACTIONS_PER_FRAME>,
    quit: bool,
    resized: bool,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one terminal event
    pub fn push_event(&mut self, event: &Event) {
        if let Event::Resize(..) = event {
            self.resized = true;
            return;
        }
        match classify(event) {
            Some(KeyIntent::Quit) => self.quit = true,
            Some(KeyIntent::Action(action)) => {
                let _ = self.actions.try_push(action);
            }
            None => {}
        }
    }

    /// Wait up to `timeout` for the first event, then take everything already buffered.
    pub fn poll(&mut self, timeout: Duration) -> std::io::Result<()> {
        let mut wait = timeout;
        while event::poll(wait)? {
            let ev = event::read()?;
            self.push_event(&ev);
            wait = Duration::ZERO;
        }
        Ok(())
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// True once after the terminal was resized.
    pub fn take_resized(&mut self) -> bool {
        std::mem::take(&mut self.resized)
    }

    pub fn actions(&self) -> &[GameAction] {
        &self.actions
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Forget this frame's intents; a quit request stays set.
    pub fn clear(&mut self) {
        self.actions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::from(code))
    }

    #[test]
    fn test_keeps_arrival_order() {
        let mut q = ActionQueue::new();
        q.push_event(&key(KeyCode::Left));
        q.push_event(&key(KeyCode::Up));
        q.push_event(&key(KeyCode::Char(' ')));
        assert_eq!(
            q.actions(),
            &[GameAction::MoveLeft, GameAction::RotateCw, GameAction::HardDrop]
        );
        q.clear();
        assert!(q.is_empty());
    }

    #[test]
    fn test_quit_sticks_across_clear() {
        let mut q = ActionQueue::new();
        q.push_event(&Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(q.quit_requested());
        assert!(q.is_empty());
        q.clear();
        assert!(q.quit_requested());
    }

    #[test]
    fn test_resize_is_reported_once() {
        let mut q = ActionQueue::new();
        q.push_event(&Event::Resize(100, 40));
        assert!(q.is_empty());
        assert!(q.take_resized());
        assert!(!q.take_resized());
    }

    #[test]
    fn test_overflow_is_dropped() {
        let mut q = ActionQueue::new();
        for _ in 0..MAX_ACTIONS_PER_FRAME + 5 {
            q.push_event(&key(KeyCode::Right));
        }
        assert_eq!(q.actions().len(), MAX_ACTIONS_PER_FRAME);
    }
}
