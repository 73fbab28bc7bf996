//! Key events driven through `InputHandler` into a `GameState`

use crossterm::event::{KeyCode, KeyEvent};

use blockfall::core::{Board, GameConfig, GameState, PieceFactory};
use blockfall::input::InputHandler;
use blockfall::types::{GameAction, PieceKind, SOFT_DROP_GRACE_MS};

fn game(kinds: &[PieceKind]) -> GameState {
    let mut game = GameState::with_factory(&GameConfig::default(), PieceFactory::sequence(kinds));
    game.start();
    game
}

fn press(input: &mut InputHandler, game: &mut GameState, code: KeyCode) {
    for action in input.handle_key_press(KeyEvent::from(code)) {
        game.apply_action(action);
    }
}

#[test]
fn held_down_key_steps_once_then_speeds_gravity() {
    let mut game = game(&[PieceKind::O]);
    let mut input = InputHandler::new();

    press(&mut input, &mut game, KeyCode::Down);
    assert_eq!(game.active().unwrap().y, 1);
    assert!(game.soft_drop_held());

    // Auto-repeat presses keep the hold without extra steps.
    press(&mut input, &mut game, KeyCode::Down);
    assert_eq!(game.active().unwrap().y, 1);

    assert!(game.tick(50));
    assert_eq!(game.active().unwrap().y, 2);
}

#[test]
fn hold_ends_without_release_event() {
    let mut game = game(&[PieceKind::O]);
    let mut input = InputHandler::new();

    press(&mut input, &mut game, KeyCode::Char('s'));
    let stop = input.update(SOFT_DROP_GRACE_MS + 1);
    assert_eq!(stop, Some(GameAction::SoftDropStop));
    game.apply_action(GameAction::SoftDropStop);
    assert!(!game.soft_drop_held());
}

#[test]
fn key_release_ends_hold() {
    let mut game = game(&[PieceKind::O]);
    let mut input = InputHandler::new();

    press(&mut input, &mut game, KeyCode::Down);
    if let Some(action) = input.handle_key_release(KeyCode::Down) {
        game.apply_action(action);
    }
    assert!(!game.soft_drop_held());
}

#[test]
fn enter_restarts_only_after_game_over() {
    let mut board = Board::new();
    board.set(4, 0, Some(PieceKind::J));
    let mut game = GameState::with_factory(&GameConfig::default(), PieceFactory::sequence(&[PieceKind::O]))
        .with_board(board);
    game.start();
    assert!(game.game_over());

    let mut input = InputHandler::new();
    press(&mut input, &mut game, KeyCode::Left);
    assert!(game.game_over());

    press(&mut input, &mut game, KeyCode::Enter);
    assert!(!game.game_over());
    assert_eq!(game.board().filled_count(), 0);
}

#[test]
fn space_hard_drops() {
    let mut game = game(&[PieceKind::I, PieceKind::T]);
    let mut input = InputHandler::new();

    press(&mut input, &mut game, KeyCode::Char(' '));
    assert!(game.board().is_occupied(3, 19));
    assert!(game.board().is_occupied(6, 19));
    assert_eq!(game.active().unwrap().kind, PieceKind::T);
}
