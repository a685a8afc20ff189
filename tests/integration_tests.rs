//! Integration tests for the engine tick loop and command surface

use blockfall::core::{Board, Engine, EngineConfig, Piece};
use blockfall::types::{Command, PieceKind, Point, QUEUED_POSITION, ROW_CLEAR_REWARD};

fn landed(board: &Board, kind: PieceKind, at: Point, rotations: usize) -> Piece {
    let mut piece = Piece::new(kind, at, board.geometry());
    for _ in 0..rotations {
        assert!(piece.rotate_right());
    }
    piece.land();
    piece
}

#[test]
fn test_bars_fill_bottom_row_and_one_tick_clears_it() {
    let mut engine = Engine::with_seed(3);

    // Two horizontal bars cover columns 0..8, two vertical bars columns 8 and 9.
    for (x, rotations) in [(0, 0), (64, 0), (128, 1), (144, 1)] {
        let bar = landed(engine.board(), PieceKind::Bar, Point::new(x, 320), rotations);
        assert_eq!(engine.board_mut().lock(&bar), 4);
    }
    assert!(engine.board().row_is_full(19));
    assert_eq!(engine.board().filled_count(), 16);

    let report = engine.tick();
    assert_eq!(report.lines_cleared, 1);
    assert_eq!(engine.score(), ROW_CLEAR_REWARD);
    assert_eq!(engine.lines(), 1);
    assert!(!engine.board().row_is_full(19));
    assert!(!engine.board().is_top_row_occupied());

    // The vertical bars dropped one row.
    assert_eq!(engine.board().filled_count(), 6);
    assert!(engine.board().is_filled(19, 8));
    assert!(engine.board().is_filled(19, 9));
    assert!(!engine.board().is_filled(16, 8));
}

#[test]
fn test_two_rows_cleared_in_one_tick() {
    let mut engine = Engine::with_seed(5);
    for row in [18, 19] {
        for col in 1..10 {
            let block = blockfall::core::Block::landed(col * 16, row * 16);
            assert!(engine.board_mut().occupy(block));
        }
    }

    let bar = {
        let mut bar = Piece::new(PieceKind::Bar, Point::new(0, 318), engine.board().geometry());
        assert!(bar.rotate_right());
        bar
    };
    engine.set_active(bar);

    let report = engine.tick();
    assert!(report.locked);
    assert_eq!(report.lines_cleared, 2);
    assert_eq!(engine.score(), 2 * ROW_CLEAR_REWARD);

    // Only the top half of the vertical bar remains, now at the bottom.
    assert_eq!(engine.board().filled_count(), 2);
    assert!(engine.board().is_filled(19, 0));
    assert!(engine.board().is_filled(18, 0));
}

#[test]
fn test_stacking_reaches_top_row() {
    let mut engine = Engine::with_seed(11);
    let mut drops = 0;
    while !engine.is_game_over() {
        assert!(drops < 200, "stack never reached the top");
        engine.hard_drop();
        drops += 1;
    }
    assert!(engine.board().is_top_row_occupied());
    assert_eq!(engine.score(), 0);
}

#[test]
fn test_hard_drop_lands_on_floor() {
    let mut engine = Engine::with_seed(42);
    let queued = engine.queued().kind();

    let report = engine.hard_drop();
    assert!(report.locked);
    assert_eq!(engine.board().filled_count(), 4);
    let bottom = engine.board().row(19).map(|cells| cells.iter().filter(|c| c.is_some()).count());
    assert!(bottom.unwrap_or(0) >= 1);

    assert_eq!(engine.active().kind(), queued);
    assert_eq!(engine.active().anchor(), engine.config().spawn_position());
}

#[test]
fn test_tick_rehomes_queued_piece() {
    let mut engine = Engine::with_seed(8);
    for _ in 0..5 {
        engine.tick();
        assert_eq!(engine.queued().anchor(), QUEUED_POSITION);
        assert!(!engine.queued().is_landed());
    }
}

#[test]
fn test_rotation_into_filled_cell_is_rejected() {
    let mut engine = Engine::with_seed(1);
    let bar = Piece::new(PieceKind::Bar, Point::new(0, 160), engine.board().geometry());
    engine.set_active(bar);

    // The vertical state would cover rows 6..=9 of column 0.
    assert!(engine.board_mut().occupy(blockfall::core::Block::landed(0, 7 * 16)));
    assert!(!engine.apply(Command::RotateRight));
    assert_eq!(engine.active().state_index(), 0);
    assert_eq!(engine.active().state().name, "HORIZONTAL");

    engine.board_mut().clear();
    assert!(engine.apply(Command::RotateRight));
    assert_eq!(engine.active().state().name, "VERTICAL");
}

#[test]
fn test_rotation_suppressed_at_spawn() {
    let mut engine = Engine::with_seed(1);
    assert!(!engine.apply(Command::RotateRight));
    assert!(!engine.apply(Command::RotateLeft));
}

#[test]
fn test_lateral_moves_stop_at_walls() {
    let mut engine = Engine::with_seed(21);
    let mut moves = 0;
    while engine.apply(Command::MoveLeft) {
        moves += 1;
        assert!(moves <= 10);
    }
    assert_eq!(engine.active().x(), 0);

    while engine.apply(Command::MoveRight) {
        moves += 1;
        assert!(moves <= 20);
    }
    let active = engine.active();
    assert_eq!(active.x() + active.width(), engine.board().width_px());
}

#[test]
fn test_same_seed_same_game() {
    let script = [
        Command::MoveLeft,
        Command::HardDrop,
        Command::MoveRight,
        Command::MoveRight,
        Command::HardDrop,
        Command::SoftDropOn,
        Command::HardDrop,
    ];

    let mut a = Engine::with_seed(777);
    let mut b = Engine::with_seed(777);
    for command in script {
        a.apply(command);
        b.apply(command);
    }
    assert_eq!(a.board(), b.board());
    assert_eq!(a.active(), b.active());
    assert_eq!(a.queued().kind(), b.queued().kind());
}

#[test]
fn test_custom_geometry() {
    let config = EngineConfig {
        rows: 8,
        cols: 6,
        cell_size: 8,
        fall_distance: 1,
        fast_fall_distance: 8,
        ..EngineConfig::default()
    };
    let mut engine = Engine::new(config, 9).unwrap();
    assert_eq!(engine.board().width_px(), 48);
    assert_eq!(engine.active().anchor(), Point::new(16, 8));

    assert!(engine.hard_drop().locked);
    for (cell, block) in engine.board().occupants() {
        assert_eq!(engine.board().cell_origin(cell), block.position());
    }
}
