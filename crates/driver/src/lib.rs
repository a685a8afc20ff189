//! Loop driver - time-based cadences over the engine
//!
//! The engine itself has no notion of time. [`LoopDriver`] owns the
//! [`Engine`] and the [`InputState`] and turns elapsed milliseconds into
//! engine calls on two independent cadences:
//!
//! - **tick cadence**: `tick_interval_ms`, or `soft_drop_tick_ms` while soft
//!   drop is held (0 ticks on every advance)
//! - **movement cadence**: `move_interval_ms`, one lateral move per interval
//!   while a direction key is held
//!
//! Each cadence fires at most once per [`LoopDriver::advance`] call. The driver
//! polls for game over after every tick and hard drop, records the final
//! score and starts a new game on the same engine.
//!
//! The driver performs no I/O, so the terminal binary and the tests drive it
//! the same way.

use blockfall_core::{Engine, TickReport};
use blockfall_input::InputState;
use blockfall_types::{Command, MOVE_INTERVAL_MS, SOFT_DROP_TICK_MS, TICK_INTERVAL_MS};

/// Cadences in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    pub tick_interval_ms: u32,
    pub soft_drop_tick_ms: u32,
    pub move_interval_ms: u32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,
            soft_drop_tick_ms: SOFT_DROP_TICK_MS,
            move_interval_ms: MOVE_INTERVAL_MS,
        }
    }
}

/// What one driver step did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Frame {
    /// The engine ticked (or hard dropped)
    pub ticked: bool,
    /// A lateral move was applied
    pub moved: bool,
    pub report: TickReport,
    /// Final score of a game that just ended
    pub game_over: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct LoopDriver {
    engine: Engine,
    input: InputState,
    config: DriverConfig,
    tick_timer_ms: u32,
    move_timer_ms: u32,
    games_played: u32,
    last_final_score: Option<u32>,
}

impl LoopDriver {
    pub fn new(engine: Engine, input: InputState, config: DriverConfig) -> Self {
        Self {
            engine,
            input,
            config,
            tick_timer_ms: 0,
            move_timer_ms: 0,
            games_played: 0,
            last_final_score: None,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Games finished so far
    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn last_final_score(&self) -> Option<u32> {
        self.last_final_score
    }

    /// Handle a key press mapped to `command`
    pub fn press(&mut self, command: Command) -> Frame {
        match self.input.press(command) {
            Some(immediate) => self.execute(immediate),
            None => Frame::default(),
        }
    }

    /// Handle an auto-repeat of a held key
    pub fn repeat(&mut self, command: Command) {
        self.input.repeat(command);
    }

    /// Handle a key release mapped to `command`
    pub fn release(&mut self, command: Command) {
        if let Some(follow_up) = self.input.release(command) {
            self.engine.apply(follow_up);
        }
    }

    fn execute(&mut self, command: Command) -> Frame {
        let mut frame = Frame::default();
        if command == Command::HardDrop {
            frame.report = self.engine.hard_drop();
            frame.ticked = true;
            self.tick_timer_ms = 0;
            frame.game_over = self.finish_if_over();
        } else {
            self.engine.apply(command);
        }
        frame
    }

    fn tick_interval_ms(&self) -> u32 {
        if self.engine.soft_drop() {
            self.config.soft_drop_tick_ms
        } else {
            self.config.tick_interval_ms
        }
    }

    /// Advance both cadences by `elapsed_ms`
    pub fn advance(&mut self, elapsed_ms: u32) -> Frame {
        let mut frame = Frame::default();

        if let Some(command) = self.input.update(elapsed_ms) {
            self.engine.apply(command);
        }

        // Both cadences fire once the full interval has elapsed, boundary included.
        self.move_timer_ms = self.move_timer_ms.saturating_add(elapsed_ms);
        if self.move_timer_ms >= self.config.move_interval_ms {
            self.move_timer_ms = 0;
            if let Some(command) = self.input.lateral() {
                frame.moved = self.engine.apply(command);
            }
        }

        self.tick_timer_ms = self.tick_timer_ms.saturating_add(elapsed_ms);
        if self.tick_timer_ms >= self.tick_interval_ms() {
            self.tick_timer_ms = 0;
            frame.report = self.engine.tick();
            frame.ticked = true;
            frame.game_over = self.finish_if_over();
        }

        frame
    }

    fn finish_if_over(&mut self) -> Option<u32> {
        if !self.engine.is_game_over() {
            return None;
        }
        let score = self.engine.score();
        self.games_played += 1;
        self.last_final_score = Some(score);

        self.engine.reset();
        self.input.reset();
        self.tick_timer_ms = 0;
        self.move_timer_ms = 0;
        Some(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_core::Block;
    use blockfall_types::{CELL_SIZE, FAST_FALL_DISTANCE, NORMAL_FALL_DISTANCE};

    fn driver() -> LoopDriver {
        LoopDriver::new(
            Engine::with_seed(12345),
            InputState::new(),
            DriverConfig::default(),
        )
    }

    #[test]
    fn test_tick_waits_for_interval() {
        let mut driver = driver();
        let y = driver.engine().active().y();

        let frame = driver.advance(10);
        assert!(!frame.ticked);
        assert_eq!(driver.engine().active().y(), y);

        let frame = driver.advance(10);
        assert!(frame.ticked);
        assert_eq!(driver.engine().active().y(), y + NORMAL_FALL_DISTANCE);
    }

    #[test]
    fn test_cadences_fire_on_exact_boundary() {
        let config = DriverConfig {
            tick_interval_ms: 50,
            move_interval_ms: 50,
            ..DriverConfig::default()
        };
        let mut driver = LoopDriver::new(Engine::with_seed(12345), InputState::new(), config);
        driver.press(Command::MoveLeft);

        let frame = driver.advance(49);
        assert!(!frame.ticked);
        assert!(!frame.moved);

        let frame = driver.advance(1);
        assert!(frame.ticked);
        assert!(frame.moved);
    }

    #[test]
    fn test_at_most_one_tick_per_advance() {
        let mut driver = driver();
        let y = driver.engine().active().y();
        driver.advance(1000);
        assert_eq!(driver.engine().active().y(), y + NORMAL_FALL_DISTANCE);
    }

    #[test]
    fn test_soft_drop_ticks_every_advance() {
        let mut driver = driver();
        driver.press(Command::SoftDropOn);
        assert!(driver.engine().soft_drop());

        let y = driver.engine().active().y();
        assert!(driver.advance(1).ticked);
        assert_eq!(driver.engine().active().y(), y + FAST_FALL_DISTANCE);

        driver.release(Command::SoftDropOn);
        assert!(!driver.engine().soft_drop());
        assert!(!driver.advance(1).ticked);
    }

    #[test]
    fn test_held_direction_moves_on_move_cadence() {
        let mut driver = driver();
        let x = driver.engine().active().x();
        driver.press(Command::MoveLeft);

        assert!(!driver.advance(30).moved);
        assert!(driver.advance(30).moved);
        assert_eq!(driver.engine().active().x(), x - CELL_SIZE);

        assert!(driver.advance(60).moved);
        assert_eq!(driver.engine().active().x(), x - 2 * CELL_SIZE);
    }

    #[test]
    fn test_hard_drop_press_locks_piece() {
        let mut driver = driver();
        let frame = driver.press(Command::HardDrop);
        assert!(frame.ticked);
        assert!(frame.report.locked);
        assert_eq!(driver.engine().board().filled_count(), 4);
    }

    #[test]
    fn test_game_over_resets_and_reports_score() {
        let mut driver = driver();
        assert!(driver.engine_mut().board_mut().occupy(Block::landed(0, 0)));

        let frame = driver.advance(20);
        assert_eq!(frame.game_over, Some(0));
        assert_eq!(driver.games_played(), 1);
        assert_eq!(driver.last_final_score(), Some(0));
        assert_eq!(driver.engine().board().filled_count(), 0);
        assert!(!driver.engine().is_game_over());
    }
}
