//! Property tests over random action and tick sequences

use proptest::prelude::*;

use blockfall::core::{calculate_line_score, level_for_lines, Board, GameSession};
use blockfall::types::{GameAction, GameEvent, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, LINE_SCORES};

#[derive(Debug, Clone, Copy)]
enum Step {
    Act(GameAction),
    Tick(u32),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => prop_oneof![
            Just(GameAction::MoveLeft),
            Just(GameAction::MoveRight),
            Just(GameAction::SoftDrop),
            Just(GameAction::RotateCw),
            Just(GameAction::RotateCcw),
            Just(GameAction::HardDrop),
            Just(GameAction::Hold),
        ]
        .prop_map(Step::Act),
        1 => Just(Step::Act(GameAction::Pause)),
        3 => (1u32..800).prop_map(Step::Tick),
    ]
}

fn run(game: &mut GameSession, step: Step) {
    match step {
        Step::Act(action) => {
            game.apply_action(action);
        }
        Step::Tick(ms) => {
            game.tick(ms);
        }
    }
}

fn board_from_mask(mask: &[u16]) -> Board {
    let mut board = Board::new();
    for (y, bits) in mask.iter().enumerate() {
        for x in 0..BOARD_WIDTH as i8 {
            if bits & (1 << x) != 0 {
                board.set(x, y as i8, Some(PieceKind::T));
            }
        }
    }
    board
}

proptest! {
    #[test]
    fn active_piece_always_fits(seed in any::<u64>(), steps in prop::collection::vec(step(), 1..200)) {
        let mut game = GameSession::new(seed);
        for s in steps {
            run(&mut game, s);
            if let Some(piece) = game.active() {
                for (x, y) in piece.cells() {
                    prop_assert!((0..BOARD_WIDTH as i8).contains(&x));
                    prop_assert!(y < BOARD_HEIGHT as i8);
                    prop_assert!(!game.board().is_occupied(x, y));
                }
            }
        }
    }

    #[test]
    fn level_tracks_lines(seed in any::<u64>(), steps in prop::collection::vec(step(), 1..300)) {
        let mut game = GameSession::new(seed);
        for s in steps {
            run(&mut game, s);
            prop_assert_eq!(game.level(), game.lines() / 10 + 1);
            prop_assert_eq!(game.level(), level_for_lines(game.lines()));
            for event in game.drain_events() {
                if let GameEvent::LineClear { lines } = event {
                    prop_assert!((1..=4).contains(&lines));
                }
            }
        }
    }

    #[test]
    fn same_seed_same_game(seed in any::<u64>(), steps in prop::collection::vec(step(), 1..100)) {
        let mut a = GameSession::new(seed);
        let mut b = GameSession::new(seed);
        for s in steps {
            run(&mut a, s);
            run(&mut b, s);
        }
        prop_assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn clearing_leaves_no_full_rows(mask in prop::collection::vec(0u16..1024, BOARD_HEIGHT as usize)) {
        let mut board = board_from_mask(&mask);
        let full_before = (0..BOARD_HEIGHT as usize).filter(|&y| board.is_row_full(y)).count();
        let occupied_before = board.occupied_count();

        let cleared = board.clear_full_rows();
        prop_assert_eq!(cleared.len(), full_before);
        prop_assert_eq!(board.occupied_count(), occupied_before - full_before * BOARD_WIDTH as usize);
        prop_assert!((0..BOARD_HEIGHT as usize).all(|y| !board.is_row_full(y)));
        prop_assert!(board.clear_full_rows().is_empty());
    }

    #[test]
    fn clear_is_noop_without_full_rows(mask in prop::collection::vec(0u16..1023, BOARD_HEIGHT as usize)) {
        // 1023 = all ten bits set is excluded, so no row is full.
        let mut board = board_from_mask(&mask);
        let before = board.clone();
        prop_assert!(board.clear_full_rows().is_empty());
        prop_assert_eq!(board, before);
    }

    #[test]
    fn line_score_table(lines in 0usize..=4, level in 1u32..50) {
        prop_assert_eq!(calculate_line_score(lines, level), LINE_SCORES[lines] * level);
    }
}
