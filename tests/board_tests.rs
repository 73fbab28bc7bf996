//! Board tests: grid access, collision and line clearing

use blockfall::core::{get_shape, Board};
use blockfall::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.get(x, y), Some(None), "cell ({}, {})", x, y);
        }
    }
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();

    assert!(board.set(5, 10, Some(PieceKind::T)));
    assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));

    assert!(board.set(5, 10, None));
    assert_eq!(board.get(5, 10), Some(None));

    assert!(!board.set(-1, 0, Some(PieceKind::T)));
    assert!(!board.set(0, BOARD_HEIGHT as i8, Some(PieceKind::T)));
}

#[test]
fn test_custom_size() {
    let board = Board::with_size(6, 12);
    assert_eq!((board.width(), board.height()), (6, 12));
    assert_eq!(board.cells().len(), 72);
}

#[test]
#[should_panic]
fn test_size_out_of_range_panics() {
    let _ = Board::with_size(3, 20);
}

#[test]
fn test_collision_walls_and_floor() {
    let board = Board::new();
    let o = get_shape(PieceKind::O);

    assert!(!board.collides(&o, 0, 0));
    assert!(!board.collides(&o, 8, 18));
    assert!(board.collides(&o, -1, 0));
    assert!(board.collides(&o, 9, 0));
    assert!(board.collides(&o, 0, 19));
}

#[test]
fn test_rows_above_board_never_collide() {
    let board = Board::new();
    let i = get_shape(PieceKind::I).rotated(blockfall::types::RotationDir::Cw);

    // Three of the four cells sit above the top edge.
    assert!(!board.collides(&i, 0, -3));
    assert!(!board.collides(&i, 0, -10));
    // Only the cell in row 0 can hit the wall.
    assert!(board.collides(&i, -1, -3));
    assert!(!board.collides(&i, -1, -4));
}

#[test]
fn test_merge_skips_cells_above_board() {
    let mut board = Board::new();
    let o = get_shape(PieceKind::O);

    board.merge(&o, 2, -1, PieceKind::O);
    assert_eq!(board.filled_count(), 2);
    assert!(board.is_occupied(2, 0));
    assert!(board.is_occupied(3, 0));
}

#[test]
fn test_single_line_clear_keeps_height() {
    let mut board = Board::from_rows(10, 20, &["....t.....", "iiiiiiiiii"]);

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[19]);
    assert_eq!(board.height(), 20);
    assert_eq!(board.cells().len(), 200);

    // Row above moved down by one.
    assert_eq!(board.get(4, 19), Some(Some(PieceKind::T)));
    assert!(board.is_row_empty(0));
    assert_eq!(board.filled_count(), 1);
}

#[test]
fn test_non_adjacent_clears_preserve_order() {
    let mut board = Board::from_rows(
        4,
        8,
        &["s...", "jjjj", ".z..", "llll", "o..."],
    );

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[6, 4]);

    assert_eq!(board.get(0, 7), Some(Some(PieceKind::O)));
    assert_eq!(board.get(1, 6), Some(Some(PieceKind::Z)));
    assert_eq!(board.get(0, 5), Some(Some(PieceKind::S)));
    for y in 0..5 {
        assert!(board.is_row_empty(y), "row {} should be empty", y);
    }
}

#[test]
fn test_no_full_rows_is_noop() {
    let mut board = Board::from_rows(10, 20, &["zzzzzzzzz."]);
    let before = board.clone();
    assert!(board.clear_full_rows().is_empty());
    assert_eq!(board, before);
}
