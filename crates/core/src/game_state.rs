//! Game state module - manages the complete game state
//!
//! Ties the board, the piece factory and scoring together. Every mutation goes
//! through [`GameState::apply_action`] or [`GameState::tick`]; the loop driver
//! owns the state and nothing here is global.
//!
//! Landing always runs the same sequence, whether it was triggered by gravity,
//! a soft drop step or a hard drop:
//!
//! 1. merge the piece into the board
//! 2. clear full rows and score them
//! 3. check for a topped-out board
//! 4. spawn the next piece (which may itself end the game)

use log::{debug, info};

use crate::config::GameConfig;
use crate::pieces::{get_shape, spawn_x, Shape};
use crate::rng::PieceFactory;
use crate::scoring::{line_clear_score, ScoringRule};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;
use crate::Board;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    /// Shape in its current orientation
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Create a piece of `kind` centered over a board of `board_width`, row 0
    pub fn spawn(kind: PieceKind, board_width: u8) -> Self {
        let shape = get_shape(kind);
        Self {
            kind,
            shape,
            x: spawn_x(board_width, shape.width()),
            y: 0,
        }
    }

    /// Check whether the piece overlaps walls, floor or filled cells
    pub fn collides(&self, board: &Board) -> bool {
        board.collides(&self.shape, self.x, self.y)
    }

    fn shifted(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<ActivePiece>,
    factory: PieceFactory,
    status: GameStatus,
    /// Last landing event (consumed by observers).
    last_event: Option<LockEvent>,
    score: u32,
    lines: u32,
    scoring: ScoringRule,
    drop_interval_ms: u32,
    soft_drop_interval_ms: u32,
    drop_timer_ms: u32,
    soft_drop_held: bool,
}

impl GameState {
    /// Create a new game with default rules and the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_factory(&GameConfig::default(), PieceFactory::random(seed))
    }

    /// Create a game from a configuration, drawing pieces at random from `seed`.
    pub fn with_config(config: &GameConfig, seed: u32) -> Self {
        Self::with_factory(config, PieceFactory::random(seed))
    }

    pub fn with_factory(config: &GameConfig, factory: PieceFactory) -> Self {
        Self {
            board: Board::with_size(config.board_width, config.board_height),
            active: None,
            factory,
            status: GameStatus::Playing,
            last_event: None,
            score: 0,
            lines: 0,
            scoring: config.scoring,
            drop_interval_ms: config.drop_interval_ms,
            soft_drop_interval_ms: config.soft_drop_interval_ms,
            drop_timer_ms: 0,
            soft_drop_held: false,
        }
    }

    /// Replace the board before the game starts (puzzles, tests).
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    /// Spawn the first piece. Does nothing once a piece is in play or the game
    /// is over.
    pub fn start(&mut self) {
        if self.active.is_some() || self.status == GameStatus::GameOver {
            return;
        }
        self.spawn_piece();
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn scoring(&self) -> ScoringRule {
        self.scoring
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn soft_drop_held(&self) -> bool {
        self.soft_drop_held
    }

    pub fn drop_timer_ms(&self) -> u32 {
        self.drop_timer_ms
    }

    /// Current gravity interval (fast while soft drop is held)
    pub fn drop_interval_ms(&self) -> u32 {
        if self.soft_drop_held {
            self.soft_drop_interval_ms
        } else {
            self.drop_interval_ms
        }
    }

    /// Take and clear the last landing event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        self.board.write_u8_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.score = self.score;
        out.lines = self.lines;
        out.status = self.status;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Spawn a new piece from the factory.
    ///
    /// Returns false (and ends the game) when the centered spawn position is
    /// already blocked.
    pub fn spawn_piece(&mut self) -> bool {
        let kind = self.factory.next_kind();
        let piece = ActivePiece::spawn(kind, self.board.width());

        if piece.collides(&self.board) {
            self.active = None;
            self.end_game();
            return false;
        }

        self.active = Some(piece);
        true
    }

    /// Try to shift the active piece; reverts (returns false) on collision.
    ///
    /// Only reachable through actions, which never lift a piece fully above
    /// row 0. Up there the walls do not apply and `x` is unbounded.
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.shifted(dx, dy);
        if moved.collides(&self.board) {
            return false;
        }
        self.active = Some(moved);
        true
    }

    /// Rotate the active piece in place. The rotation is discarded when the
    /// rotated shape collides at the current origin.
    pub(crate) fn try_rotate(&mut self, dir: RotationDir) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let rotated = ActivePiece {
            shape: active.shape.rotated(dir),
            ..active
        };
        if rotated.collides(&self.board) {
            return false;
        }
        self.active = Some(rotated);
        true
    }

    /// One row down, landing the piece when it cannot move.
    ///
    /// Shared by gravity and the soft drop action.
    fn step_down(&mut self) -> bool {
        if self.active.is_none() {
            return false;
        }
        if !self.try_move(0, 1) {
            self.lock_piece();
        }
        true
    }

    /// Drop the active piece to its lowest free row and land it.
    ///
    /// Returns the number of rows dropped.
    pub fn hard_drop(&mut self) -> u32 {
        let mut distance = 0;
        while self.try_move(0, 1) {
            distance += 1;
        }
        self.lock_piece();
        self.drop_timer_ms = 0;
        distance
    }

    /// Lock the active piece onto the board and handle line clears
    pub fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.board
            .merge(&active.shape, active.x, active.y, active.kind);

        let cleared = self.board.clear_full_rows();
        let lines_cleared = cleared.len();
        let line_clear_score = line_clear_score(self.scoring, lines_cleared);
        if lines_cleared > 0 {
            self.lines = self.lines.saturating_add(lines_cleared as u32);
            self.score = self.score.saturating_add(line_clear_score);
            debug!(
                "cleared rows {:?} ({} points, score {})",
                cleared.as_slice(),
                line_clear_score,
                self.score
            );
        } else {
            debug!("{} landed at ({}, {})", active.kind.as_str(), active.x, active.y);
        }

        // Anything left in the top row after clearing means the stack reached
        // the spawn area.
        if !self.board.is_row_empty(0) {
            self.end_game();
        } else {
            self.drop_timer_ms = 0;
            self.spawn_piece();
        }

        self.last_event = Some(LockEvent {
            lines_cleared: lines_cleared as u32,
            line_clear_score,
            game_over: self.game_over(),
        });
    }

    fn end_game(&mut self) {
        self.status = GameStatus::GameOver;
        self.soft_drop_held = false;
        info!("game over, final score {}", self.score);
    }

    /// Start over after a game over.
    fn restart(&mut self) -> bool {
        if self.status != GameStatus::GameOver {
            return false;
        }
        self.board.clear();
        self.active = None;
        self.score = 0;
        self.lines = 0;
        self.drop_timer_ms = 0;
        self.soft_drop_held = false;
        self.last_event = None;
        self.status = GameStatus::Playing;
        info!("restart");
        self.spawn_piece();
        true
    }

    /// Gravity: advance the drop timer and step the piece down when due.
    ///
    /// Returns true when the piece moved or landed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.status == GameStatus::GameOver || self.active.is_none() {
            return false;
        }

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms < self.drop_interval_ms() {
            return false;
        }
        self.drop_timer_ms = 0;
        self.step_down()
    }

    /// Apply a game action
    ///
    /// While the game is over only [`GameAction::Restart`] is accepted, and
    /// restart is ignored while playing.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if self.status == GameStatus::GameOver {
            return match action {
                GameAction::Restart => self.restart(),
                _ => false,
            };
        }

        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => {
                let stepped = self.step_down();
                self.drop_timer_ms = 0;
                stepped
            }
            GameAction::HardDrop => {
                if self.active.is_none() {
                    return false;
                }
                self.hard_drop();
                true
            }
            GameAction::RotateCw => self.try_rotate(RotationDir::Cw),
            GameAction::RotateCcw => self.try_rotate(RotationDir::Ccw),
            GameAction::SoftDropStart => self.set_soft_drop(true),
            GameAction::SoftDropStop => self.set_soft_drop(false),
            GameAction::Restart => false,
        }
    }

    fn set_soft_drop(&mut self, held: bool) -> bool {
        if self.soft_drop_held == held {
            return false;
        }
        self.soft_drop_held = held;
        // Apply the new interval from now on.
        self.drop_timer_ms = 0;
        true
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scripted(kinds: &[PieceKind]) -> GameState {
        let mut state = GameState::with_factory(&GameConfig::default(), PieceFactory::sequence(kinds));
        state.start();
        state
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.lines, 0);
        assert!(state.active.is_none());
        assert!(!state.soft_drop_held);
        assert_eq!(state.board.filled_count(), 0);
    }

    #[test]
    fn test_start_spawns_once() {
        let mut state = scripted(&[PieceKind::T, PieceKind::O]);
        assert_eq!(state.active.unwrap().kind, PieceKind::T);

        state.start();
        assert_eq!(state.active.unwrap().kind, PieceKind::T);
    }

    #[test]
    fn test_spawn_centers_piece() {
        let state = scripted(&[PieceKind::O]);
        let active = state.active.unwrap();
        // floor(10 / 2) - floor(2 / 2)
        assert_eq!((active.x, active.y), (4, 0));

        let state = scripted(&[PieceKind::T]);
        // floor(10 / 2) - floor(3 / 2)
        assert_eq!(state.active.unwrap().x, 4);
    }

    #[test]
    fn test_try_move_and_walls() {
        let mut state = scripted(&[PieceKind::O]);

        assert!(state.try_move(1, 0));
        assert_eq!(state.active.unwrap().x, 5);
        assert!(state.try_move(-1, 0));

        let mut moved = 0;
        while state.try_move(-1, 0) {
            moved += 1;
        }
        assert_eq!(moved, 4);
        assert_eq!(state.active.unwrap().x, 0);
    }

    #[test]
    fn test_try_move_up_is_not_blocked_by_top() {
        let mut state = scripted(&[PieceKind::O]);
        // Rows above the board never collide.
        assert!(state.try_move(0, -1));
        assert_eq!(state.active.unwrap().y, -1);
    }

    #[test]
    fn test_rotation_above_top_is_allowed() {
        let mut state = scripted(&[PieceKind::I]);
        assert!(state.apply_action(GameAction::RotateCw));
        let active = state.active.unwrap();
        assert_eq!((active.shape.width(), active.shape.height()), (1, 4));

        assert!(state.try_move(0, -2));
        assert!(state.try_rotate(RotationDir::Ccw));
        assert_eq!(state.active.unwrap().y, -2);
    }

    #[test]
    fn test_every_orientation_touches_its_origin_row() {
        // Actions keep y >= 0, so a piece always has a cell on the board and
        // the side walls stay in effect.
        for kind in PieceKind::ALL {
            let mut shape = get_shape(kind);
            for _ in 0..4 {
                assert!(shape.filled().any(|(_, dy)| dy == 0), "{:?}", kind);
                shape = shape.rotated(RotationDir::Cw);
            }
        }
    }

    #[test]
    fn test_move_left_spam_stops_at_wall() {
        let mut state = scripted(&[PieceKind::I]);
        state.apply_action(GameAction::RotateCw);
        for _ in 0..200 {
            state.apply_action(GameAction::MoveLeft);
        }
        assert_eq!(state.active.unwrap().x, 0);
    }

    #[test]
    fn test_rotate_changes_extents() {
        let mut state = scripted(&[PieceKind::I]);
        assert!(state.try_rotate(RotationDir::Cw));
        let shape = state.active.unwrap().shape;
        assert_eq!((shape.width(), shape.height()), (1, 4));

        assert!(state.try_rotate(RotationDir::Ccw));
        assert_eq!(state.active.unwrap().shape, get_shape(PieceKind::I));
    }

    #[test]
    fn test_blocked_rotation_is_discarded() {
        let mut state = scripted(&[PieceKind::I]);
        // I sits at columns 3..=6 of row 0; its vertical form would cover
        // column 3, rows 0..=3.
        state.board.set(3, 2, Some(PieceKind::Z));

        let before = state.active.unwrap();
        assert!(!state.try_rotate(RotationDir::Cw));
        assert_eq!(state.active.unwrap(), before);
    }

    #[test]
    fn test_hard_drop_lands_on_floor() {
        let mut state = scripted(&[PieceKind::O, PieceKind::T]);

        assert!(state.apply_action(GameAction::HardDrop));
        assert!(state.board.is_occupied(4, 19));
        assert!(state.board.is_occupied(5, 18));
        assert_eq!(state.active.unwrap().kind, PieceKind::T);

        let event = state.take_last_event().unwrap();
        assert_eq!(event.lines_cleared, 0);
        assert!(!event.game_over);
        assert!(state.take_last_event().is_none());
    }

    #[test]
    fn test_soft_drop_steps_then_lands() {
        let mut state = scripted(&[PieceKind::O, PieceKind::I]);

        for _ in 0..18 {
            assert!(state.apply_action(GameAction::SoftDrop));
        }
        assert_eq!(state.active.unwrap().y, 18);
        assert_eq!(state.board.filled_count(), 0);

        // Blocked by the floor: lands and spawns the next piece.
        assert!(state.apply_action(GameAction::SoftDrop));
        assert_eq!(state.board.filled_count(), 4);
        assert_eq!(state.active.unwrap().kind, PieceKind::I);
    }

    #[test]
    fn test_soft_drop_resets_gravity_timer() {
        let mut state = scripted(&[PieceKind::O]);
        state.tick(900);
        assert_eq!(state.drop_timer_ms, 900);
        state.apply_action(GameAction::SoftDrop);
        assert_eq!(state.drop_timer_ms, 0);
    }

    #[test]
    fn test_tick_gravity() {
        let mut state = scripted(&[PieceKind::O]);

        assert!(!state.tick(999));
        assert_eq!(state.active.unwrap().y, 0);
        assert!(state.tick(1));
        assert_eq!(state.active.unwrap().y, 1);
        assert_eq!(state.drop_timer_ms, 0);
    }

    #[test]
    fn test_soft_drop_hold_speeds_up_gravity() {
        let mut state = scripted(&[PieceKind::O]);

        assert!(state.apply_action(GameAction::SoftDropStart));
        assert_eq!(state.drop_interval_ms(), SOFT_DROP_INTERVAL_MS);
        assert!(!state.apply_action(GameAction::SoftDropStart));

        assert!(state.tick(SOFT_DROP_INTERVAL_MS));
        assert_eq!(state.active.unwrap().y, 1);

        assert!(state.apply_action(GameAction::SoftDropStop));
        assert_eq!(state.drop_interval_ms(), BASE_DROP_MS);
        assert!(!state.tick(SOFT_DROP_INTERVAL_MS));
    }

    #[test]
    fn test_line_clear_scores_doubling() {
        let board = Board::from_rows(
            10,
            20,
            &["zzzzzzzz..", "zzzzzzzz.."],
        );
        let mut state = GameState::with_factory(
            &GameConfig::default(),
            PieceFactory::sequence(&[PieceKind::O, PieceKind::T]),
        )
        .with_board(board);
        state.start();

        // Move the O to the right edge and drop it into the gap.
        while state.try_move(1, 0) {}
        state.apply_action(GameAction::HardDrop);

        assert_eq!(state.lines, 2);
        assert_eq!(state.score, 300);
        assert_eq!(state.board.filled_count(), 0);
        let event = state.take_last_event().unwrap();
        assert_eq!(event.lines_cleared, 2);
        assert_eq!(event.line_clear_score, 300);
    }

    #[test]
    fn test_line_clear_scores_flat() {
        let config = GameConfig {
            scoring: ScoringRule::Flat,
            ..GameConfig::default()
        };
        let board = Board::from_rows(10, 20, &["zzzzzzzz..", "zzzzzzzz.."]);
        let mut state =
            GameState::with_factory(&config, PieceFactory::sequence(&[PieceKind::O])).with_board(board);
        state.start();

        while state.try_move(1, 0) {}
        state.apply_action(GameAction::HardDrop);

        assert_eq!(state.score, 200);
    }

    #[test]
    fn test_blocked_spawn_ends_game() {
        let mut board = Board::new();
        board.set(4, 0, Some(PieceKind::L));
        let mut state =
            GameState::with_factory(&GameConfig::default(), PieceFactory::sequence(&[PieceKind::O]))
                .with_board(board);
        state.start();

        assert_eq!(state.status, GameStatus::GameOver);
        assert!(state.active.is_none());
    }

    #[test]
    fn test_top_out_after_landing_ends_game() {
        // Column 4/5 filled up to row 2; an O landing on it reaches row 0.
        let mut board = Board::new();
        for y in 2..20 {
            board.set(4, y, Some(PieceKind::J));
        }
        let mut state =
            GameState::with_factory(&GameConfig::default(), PieceFactory::sequence(&[PieceKind::O]))
                .with_board(board);
        state.start();
        assert_eq!(state.status, GameStatus::Playing);

        state.apply_action(GameAction::HardDrop);
        assert_eq!(state.status, GameStatus::GameOver);
        assert!(state.take_last_event().unwrap().game_over);
    }

    #[test]
    fn test_actions_ignored_after_game_over() {
        let mut state = scripted(&[PieceKind::O]);
        state.end_game();

        for action in [
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::SoftDrop,
            GameAction::HardDrop,
            GameAction::RotateCw,
            GameAction::SoftDropStart,
        ] {
            assert!(!state.apply_action(action), "{:?}", action);
        }
        assert!(!state.tick(10_000));
    }

    #[test]
    fn test_restart_only_from_game_over() {
        let mut state = scripted(&[PieceKind::O, PieceKind::I]);
        state.score = 500;

        assert!(!state.apply_action(GameAction::Restart));
        assert_eq!(state.score, 500);

        state.board.set(0, 19, Some(PieceKind::S));
        state.end_game();
        assert!(state.apply_action(GameAction::Restart));
        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.lines, 0);
        assert_eq!(state.board.filled_count(), 0);
        assert!(state.active.is_some());
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = scripted(&[PieceKind::T]);
        state.board.set(0, 19, Some(PieceKind::L));

        let snap = state.snapshot();
        assert_eq!((snap.width, snap.height), (10, 20));
        assert_eq!(snap.cell(0, 19), PieceKind::L.id());
        assert_eq!(snap.active.unwrap().kind, PieceKind::T);
        assert_eq!(snap.status, GameStatus::Playing);
    }
}
