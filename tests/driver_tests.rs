//! Loop driver tests through the facade: cadences, input flow, game over

use blockfall::config::AppConfig;
use blockfall::core::{Block, Engine};
use blockfall::driver::{DriverConfig, LoopDriver};
use blockfall::input::InputState;
use blockfall::types::{Command, CELL_SIZE, NORMAL_FALL_DISTANCE, ROW_CLEAR_REWARD};

fn driver(seed: u32) -> LoopDriver {
    AppConfig::default().build_driver(seed).unwrap()
}

#[test]
fn test_ticks_follow_configured_interval() {
    let config = DriverConfig {
        tick_interval_ms: 50,
        ..DriverConfig::default()
    };
    let mut driver = LoopDriver::new(Engine::with_seed(4), InputState::new(), config);
    let y = driver.engine().active().y();

    let ticks = (0..10).filter(|_| driver.advance(10).ticked).count();
    assert_eq!(ticks, 2);
    assert_eq!(driver.engine().active().y(), y + 2 * NORMAL_FALL_DISTANCE);
}

#[test]
fn test_game_over_reports_final_score_and_restarts() {
    let mut driver = driver(17);

    for col in 0..10 {
        let block = Block::landed(col * CELL_SIZE, 19 * CELL_SIZE);
        assert!(driver.engine_mut().board_mut().occupy(block));
    }
    let frame = driver.advance(20);
    assert_eq!(frame.report.lines_cleared, 1);
    assert_eq!(frame.game_over, None);
    assert_eq!(driver.engine().score(), ROW_CLEAR_REWARD);

    assert!(driver.engine_mut().board_mut().occupy(Block::landed(0, 0)));
    let frame = driver.advance(20);
    assert_eq!(frame.game_over, Some(ROW_CLEAR_REWARD));
    assert_eq!(driver.games_played(), 1);
    assert_eq!(driver.last_final_score(), Some(ROW_CLEAR_REWARD));

    // The next game starts clean.
    assert_eq!(driver.engine().score(), 0);
    assert_eq!(driver.engine().board().filled_count(), 0);
    assert!(driver.advance(20).game_over.is_none());
}

#[test]
fn test_soft_drop_times_out_without_release_events() {
    let mut driver = driver(2);
    driver.press(Command::SoftDropOn);
    assert!(driver.engine().soft_drop());

    // Default release timeout is 150ms.
    for _ in 0..9 {
        driver.advance(16);
    }
    assert!(driver.engine().soft_drop());
    driver.advance(16);
    assert!(!driver.engine().soft_drop());
}

#[test]
fn test_tap_moves_once() {
    let mut driver = driver(6);
    let x = driver.engine().active().x();
    driver.press(Command::MoveLeft);
    driver.release(Command::MoveLeft);

    let moves = (0..10).filter(|_| driver.advance(60).moved).count();
    assert_eq!(moves, 1);
    assert_eq!(driver.engine().active().x(), x - CELL_SIZE);
}

#[test]
fn test_rotation_press_applies_immediately() {
    let mut driver = driver(6);
    // Fall far enough that rotation is allowed.
    while driver.engine().active().y() <= 2 * CELL_SIZE {
        driver.advance(20);
    }
    let kind = driver.engine().active().kind();
    let before = driver.engine().active().state_index();
    driver.press(Command::RotateRight);
    let after = driver.engine().active().state_index();
    if driver.engine().active().state_count() == 4 {
        assert_eq!(after, (before + 1) % 4, "{:?}", kind);
    } else {
        assert_eq!(after, before);
    }
}
