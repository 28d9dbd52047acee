use blockfall::core::GameSession;
use blockfall::term::{piece_color, AnchorY, FrameBuffer, GameView, Viewport};
use blockfall::types::{GameAction, PieceKind};

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameSession::new(1).snapshot();
    let view = GameView::default();

    // 10x20 cells at 2x1 plus the border => 22x22
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_two_chars_wide_in_piece_color() {
    let mut snap = GameSession::new(1).snapshot();
    snap.board[19][0] = PieceKind::S.code();
    snap.active = None;
    snap.ghost_y = None;

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    let (x0, y0) = (1, 1 + 19);
    for x in [x0, x0 + 1] {
        let cell = fb.get(x, y0).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, piece_color(PieceKind::S));
    }
    assert_eq!(fb.get(x0 + 2, y0).unwrap().ch, '·');
}

#[test]
fn term_view_draws_active_and_ghost() {
    let game = GameSession::new(4);
    let snap = game.snapshot();
    let active = snap.active.unwrap();
    let ghost_y = snap.ghost_y.unwrap();

    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, Viewport::new(22, 22));

    let count = |ch: char| fb.cells().iter().filter(|c| c.ch == ch).count();
    // Four minos, two columns each, for both the piece and its shadow.
    assert_eq!(count('█'), 8);
    assert_eq!(count('░'), 8);
    assert!(ghost_y > active.y);
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = GameSession::new(1).snapshot();
    snap.score = 1234;
    snap.high_score = 99999;
    snap.level = 2;
    snap.lines = 10;
    snap.hold = Some(PieceKind::T);

    let fb = GameView::default().render(&snap, Viewport::new(60, 30));
    let text = screen_text(&fb);
    for needle in ["HOLD", "NEXT", "SCORE", "1234", "BEST", "99999", "LEVEL", "LINES", "P pause"] {
        assert!(text.contains(needle), "missing {:?}", needle);
    }
}

#[test]
fn term_view_skips_side_panel_when_narrow() {
    let snap = GameSession::new(1).snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(30, 22));
    assert!(!screen_text(&fb).contains("SCORE"));
}

#[test]
fn term_view_overlays() {
    let mut game = GameSession::new(1);
    game.apply_action(GameAction::Pause);
    let fb = GameView::default().render(&game.snapshot(), Viewport::new(40, 24));
    assert!(screen_text(&fb).contains("PAUSED"));

    let mut game = GameSession::new(1);
    while !game.game_over() {
        game.apply_action(GameAction::HardDrop);
    }
    let snap = game.snapshot();
    assert!(snap.active.is_none());
    let fb = GameView::default().render(&snap, Viewport::new(40, 24));
    let text = screen_text(&fb);
    assert!(text.contains("GAME OVER"));
    assert!(text.contains("R to restart"));
}
