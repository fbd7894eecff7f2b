//! Board tests - rules engine through the public API

use tetris::core::{base_shape, Board, Direction, Point, Shape};
use tetris::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_ROW};

fn fill_row(board: &mut Board, row: i8) {
    for col in 0..BOARD_WIDTH as i8 {
        assert!(board.set(Point::new(row, col), Cell::Blue));
    }
}

/// Vertical shape in column 9 covering rows `bottom..bottom + 4`
fn column_span(bottom: i8) -> Shape {
    Shape::new([
        Point::new(bottom, 9),
        Point::new(bottom + 1, 9),
        Point::new(bottom + 2, 9),
        Point::new(bottom + 3, 9),
    ])
}

#[test]
fn test_board_new_is_empty() {
    let board = Board::new(1);
    assert!(board.active().is_none());
    assert!(!board.is_game_over());
    assert_eq!(board.score(), 0);
    for row in board.cells().iter() {
        assert!(row.iter().all(|c| c.is_empty()));
    }
}

#[test]
fn test_set_out_of_bounds() {
    let mut board = Board::new(1);
    assert!(!board.set(Point::new(-1, 0), Cell::Red));
    assert!(!board.set(Point::new(0, BOARD_WIDTH as i8), Cell::Red));
    assert!(!board.set(Point::new(BOARD_HEIGHT as i8, 0), Cell::Red));
    assert!(board.set(Point::new(BOARD_HEIGHT as i8 - 1, 0), Cell::Red));
}

#[test]
fn test_set_rejects_ghost() {
    let mut board = Board::new(1);
    assert!(!board.set(Point::new(0, 0), Cell::Ghost));
    assert_eq!(board.grid().get(Point::new(0, 0)), Some(Cell::Empty));
    assert!(!board.check_collision(&base_shape(PieceKind::O)));
}

#[test]
fn test_collision_reports_bounds_and_locked_cells() {
    let mut board = Board::new(1);
    let t = base_shape(PieceKind::T).translated(5, 3);
    assert!(!board.check_collision(&t));

    assert!(board.check_collision(&t.translated(0, -4)));
    assert!(board.check_collision(&t.translated(0, 6)));
    assert!(board.check_collision(&t.translated(-6, 0)));
    assert!(board.check_collision(&t.translated(16, 0)));

    board.set(Point::new(6, 4), Cell::Red);
    assert!(board.check_collision(&t));
}

#[test]
fn test_active_piece_never_collides_with_itself() {
    let mut board = Board::new(7);
    board.add_piece();
    let shape = board.active_shape().unwrap();
    assert!(!board.check_collision(&shape));
}

#[test]
fn test_reverted_moves_leave_cells_identical() {
    let mut board = Board::new(3);
    assert!(board.place_active(PieceKind::L, base_shape(PieceKind::L).translated(8, 4)));
    let before = board.cells();

    assert!(board.move_piece(Direction::Left));
    assert_ne!(board.cells(), before);
    assert!(board.move_piece(Direction::Right));
    assert_eq!(board.cells(), before);

    for _ in 0..4 {
        assert!(board.rotate_piece());
    }
    assert_eq!(board.cells(), before);
}

#[test]
fn test_blocked_move_changes_nothing() {
    let mut board = Board::new(3);
    assert!(board.place_active(PieceKind::J, base_shape(PieceKind::J).translated(4, 0)));
    let before = board.cells();
    assert!(!board.move_piece(Direction::Left));
    assert_eq!(board.cells(), before);
}

#[test]
fn test_o_piece_rotation_is_a_no_op() {
    let mut board = Board::new(3);
    let shape = base_shape(PieceKind::O).translated(10, 4);
    assert!(board.place_active(PieceKind::O, shape));
    assert!(!board.rotate_piece());
    assert_eq!(board.active_shape(), Some(shape));
}

#[test]
fn test_single_row_scores_200() {
    let mut board = Board::new(1);
    fill_row(&mut board, 0);
    assert_eq!(board.check_row_completion(&column_span(0)), 1);
    assert_eq!(board.score(), 200);
}

#[test]
fn test_three_rows_score_1000() {
    let mut board = Board::new(1);
    for row in 0..3 {
        fill_row(&mut board, row);
    }
    assert_eq!(board.check_row_completion(&column_span(0)), 3);
    assert_eq!(board.score(), 1000);
    for row in board.cells().iter() {
        assert!(row.iter().all(|c| c.is_empty()));
    }
}

#[test]
fn test_no_full_rows_scores_nothing() {
    let mut board = Board::new(1);
    board.set(Point::new(0, 0), Cell::Red);
    assert_eq!(board.check_row_completion(&column_span(0)), 0);
    assert_eq!(board.score(), 0);
    assert_eq!(board.cell(Point::new(0, 0)), Some(Cell::Red));
}

#[test]
fn test_cascading_clear_of_rows_zero_and_two() {
    let mut board = Board::new(1);
    fill_row(&mut board, 0);
    board.set(Point::new(1, 0), Cell::Red);
    fill_row(&mut board, 2);
    board.set(Point::new(3, 5), Cell::Green);

    assert_eq!(board.check_row_completion(&column_span(0)), 2);
    assert_eq!(board.score(), 600);

    // Survivors moved down two rows each.
    let cells = board.cells();
    assert_eq!(cells[0][0], Cell::Red);
    assert_eq!(cells[1][5], Cell::Green);
    assert_eq!(cells[0].iter().filter(|c| !c.is_empty()).count(), 1);
    assert_eq!(cells[1].iter().filter(|c| !c.is_empty()).count(), 1);
    assert!(cells[2..].iter().flatten().all(|c| c.is_empty()));
}

#[test]
fn test_cascading_clear_pulls_rows_from_above_the_shape() {
    let mut board = Board::new(1);
    for row in 0..=2 {
        fill_row(&mut board, row);
    }
    board.set(Point::new(3, 2), Cell::Red);
    let flat = Shape::new([
        Point::new(0, 0),
        Point::new(0, 1),
        Point::new(0, 2),
        Point::new(0, 3),
    ]);

    // Only row 0 is scanned; rows 1 and 2 fall into it one pass at a time.
    assert_eq!(board.check_row_completion(&flat), 3);
    assert_eq!(board.score(), 1000);

    let cells = board.cells();
    assert_eq!(cells[0][2], Cell::Red);
    assert_eq!(cells[0].iter().filter(|c| !c.is_empty()).count(), 1);
    assert!(cells[1..].iter().flatten().all(|c| c.is_empty()));
}

#[test]
fn test_rows_outside_the_shape_are_not_cleared() {
    let mut board = Board::new(1);
    fill_row(&mut board, 0);
    assert_eq!(board.check_row_completion(&column_span(4)), 0);
    assert!(board.cells()[0].iter().all(|c| !c.is_empty()));
}

#[test]
fn test_blocked_spawn_ends_game() {
    let mut board = Board::new(9);
    fill_row(&mut board, SPAWN_ROW);
    fill_row(&mut board, SPAWN_ROW + 1);

    board.add_piece();
    assert!(board.is_game_over());

    // Game over is monotonic.
    board.add_piece();
    assert!(board.is_game_over());
}

#[test]
fn test_lock_inside_buffer_ends_game() {
    let mut board = Board::new(9);
    board.set(Point::new(SPAWN_ROW - 1, 4), Cell::Red);
    assert!(board.place_active(PieceKind::O, base_shape(PieceKind::O).translated(SPAWN_ROW, 4)));

    assert!(board.apply_gravity());
    assert!(board.is_game_over());
    let event = board.take_last_event().unwrap();
    assert!(event.game_over);
    assert_eq!(event.kind, PieceKind::O);
}

#[test]
fn test_lock_partly_below_buffer_keeps_playing() {
    let mut board = Board::new(9);
    board.set(Point::new(SPAWN_ROW - 2, 4), Cell::Red);
    assert!(board.place_active(
        PieceKind::O,
        base_shape(PieceKind::O).translated(SPAWN_ROW - 1, 4)
    ));

    assert!(board.apply_gravity());
    // The lock itself is fine; only the following spawn could still be blocked.
    assert!(!board.take_last_event().unwrap().game_over);
}

#[test]
fn test_instafall_terminates_and_rests_on_floor() {
    let mut board = Board::new(5);
    assert!(board.place_active(PieceKind::T, base_shape(PieceKind::T).translated(SPAWN_ROW, 3)));

    let steps = board.instafall();
    assert!(steps <= BOARD_HEIGHT as u32, "took {steps} steps");
    assert_eq!(steps, 21);

    let cells = board.cells();
    for col in 3..=5 {
        assert_eq!(cells[0][col], Cell::Purple);
    }
    assert_eq!(cells[1][4], Cell::Purple);
    assert!(board.active().is_some(), "next piece spawned");
}

#[test]
fn test_instafall_stops_on_stack() {
    let mut board = Board::new(5);
    for row in 0..5 {
        board.set(Point::new(row, 0), Cell::Red);
    }
    assert!(board.place_active(PieceKind::I, base_shape(PieceKind::I).translated(10, 0)));
    let ghost = board.ghost_shape().unwrap();
    board.instafall();

    // The I lies flat on top of the column: row 5, columns 0..=3.
    assert!(ghost.points().iter().all(|p| p.row == 5));
    for col in 0..4 {
        assert_eq!(board.cell(Point::new(5, col)), Some(Cell::Cyan));
    }
}

#[test]
fn test_spawn_offsets_stay_in_bounds() {
    let mut max_offset = [0i8; 7];
    let mut board = Board::new(2024);

    for _ in 0..2000 {
        let kind = board.next_kind();
        board.add_piece();
        let shape = board.active_shape().unwrap();
        let min_col = shape.points().iter().map(|p| p.col).min().unwrap();

        for p in shape.points() {
            assert!((0..BOARD_WIDTH as i8).contains(&p.col));
            assert!(p.row == SPAWN_ROW || p.row == SPAWN_ROW + 1);
        }
        let i = PieceKind::ALL.iter().position(|k| *k == kind).unwrap();
        max_offset[i] = max_offset[i].max(min_col);
    }

    let offset = |kind: PieceKind| max_offset[PieceKind::ALL.iter().position(|k| *k == kind).unwrap()];
    assert_eq!(offset(PieceKind::I), 6);
    assert_eq!(offset(PieceKind::O), 8);
    assert_eq!(offset(PieceKind::T), 7);
    assert!(offset(PieceKind::I) < offset(PieceKind::O));
}

#[test]
fn test_same_seed_same_sequence() {
    let mut a = Board::new(77);
    let mut b = Board::new(77);
    for _ in 0..50 {
        a.add_piece();
        b.add_piece();
        assert_eq!(a.active(), b.active());
        assert_eq!(a.next_kind(), b.next_kind());
    }
}
