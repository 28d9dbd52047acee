//! Key mapping from terminal events to game intents.
//!
//! Bindings are fixed. Only key presses count; auto-repeat and release events
//! are ignored, so holding a key does not repeat the intent.

use crate::types::GameAction;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What one key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyIntent {
    Action(GameAction),
    Quit,
}

/// Map a key to a game action.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    let code = match key.code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => Some(GameAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => Some(GameAction::MoveRight),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => Some(GameAction::SoftDrop),

        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => Some(GameAction::RotateCw),
        KeyCode::Char('z') | KeyCode::Char('y') => Some(GameAction::RotateCcw),

        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char('c') => Some(GameAction::Hold),
        KeyCode::Char('p') => Some(GameAction::Pause),
        KeyCode::Char('r') => Some(GameAction::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
            && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Classify a terminal event. Non-key events and non-press kinds yield `None`.
pub fn classify(event: &Event) -> Option<KeyIntent> {
    let Event::Key(key) = event else {
        return None;
    };
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if should_quit(*key) {
        return Some(KeyIntent::Quit);
    }
    handle_key_event(*key).map(KeyIntent::Action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::from(code))
    }

    #[test]
    fn test_movement_keys() {
        for (code, action) in [
            (KeyCode::Left, GameAction::MoveLeft),
            (KeyCode::Char('a'), GameAction::MoveLeft),
            (KeyCode::Char('H'), GameAction::MoveLeft),
            (KeyCode::Right, GameAction::MoveRight),
            (KeyCode::Char('D'), GameAction::MoveRight),
            (KeyCode::Char('l'), GameAction::MoveRight),
            (KeyCode::Down, GameAction::SoftDrop),
            (KeyCode::Char('s'), GameAction::SoftDrop),
            (KeyCode::Char('J'), GameAction::SoftDrop),
        ] {
            assert_eq!(handle_key_event(KeyEvent::from(code)), Some(action), "{:?}", code);
        }
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Up)),
            Some(GameAction::RotateCw)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('W'))),
            Some(GameAction::RotateCw)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('z'))),
            Some(GameAction::RotateCcw)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('Y'))),
            Some(GameAction::RotateCcw)
        );
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(GameAction::HardDrop)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('C'))),
            Some(GameAction::Hold)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('p'))),
            Some(GameAction::Pause)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('r'))),
            Some(GameAction::Restart)
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }

    #[test]
    fn test_ctrl_c_is_quit_not_hold() {
        let ev = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(classify(&ev), Some(KeyIntent::Quit));
    }

    #[test]
    fn test_classify_ignores_repeat_and_release() {
        assert_eq!(
            classify(&press(KeyCode::Left)),
            Some(KeyIntent::Action(GameAction::MoveLeft))
        );
        for kind in [KeyEventKind::Repeat, KeyEventKind::Release] {
            let ev = Event::Key(KeyEvent::new_with_kind_and_state(
                KeyCode::Left,
                KeyModifiers::NONE,
                kind,
                KeyEventState::NONE,
            ));
            assert_eq!(classify(&ev), None);
        }
        assert_eq!(classify(&Event::FocusLost), None);
    }
}
