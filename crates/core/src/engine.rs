//! Engine module - the tick state machine and player command surface
//!
//! The engine owns the board, the falling (active) piece, the next (queued)
//! piece and the score. [`Engine::tick`] advances the simulation one step:
//!
//! 1. the active piece falls by its fall distance
//! 2. the queued piece is re-homed to its off-board display position
//! 3. if the active piece rests on something (or reached the floor) it locks
//! 4. every full row is cleared and the rows above it shift down
//! 5. a landed active piece is replaced by the queued one
//!
//! Game over is not an engine state. Callers poll
//! [`Board::is_top_row_occupied`] (or [`Engine::is_game_over`]) after each tick.

use std::fmt;

use crate::board::Board;
use crate::piece::Piece;
use crate::rng::PieceGenerator;
use crate::types::*;

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub rows: u16,
    pub cols: u16,
    pub cell_size: i32,
    pub fall_distance: i32,
    pub fast_fall_distance: i32,
    pub row_reward: u32,
    pub queued_position: Point,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: BOARD_ROWS,
            cols: BOARD_COLS,
            cell_size: CELL_SIZE,
            fall_distance: NORMAL_FALL_DISTANCE,
            fast_fall_distance: FAST_FALL_DISTANCE,
            row_reward: ROW_CLEAR_REWARD,
            queued_position: QUEUED_POSITION,
        }
    }
}

/// A rule violated by an [`EngineConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Fewer than one row
    Rows,
    /// Too narrow for a horizontal bar
    Cols,
    CellSize,
    /// Not in `1..=cell_size` or does not divide `cell_size`
    FallDistance,
    FastFallDistance,
    /// The board measured in units does not fit in an `i32`
    TooLarge,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ConfigError::Rows => "rows must be at least 1",
            ConfigError::Cols => "cols must be at least 4",
            ConfigError::CellSize => "cell_size must be at least 1",
            ConfigError::FallDistance => {
                "fall_distance must be between 1 and cell_size and divide cell_size"
            }
            ConfigError::FastFallDistance => {
                "fast_fall_distance must be between 1 and cell_size and divide cell_size"
            }
            ConfigError::TooLarge => "rows and cols times cell_size must fit in 32 bits",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ConfigError {}

/// Narrowest board every rotation state fits on. Spawns are pulled left
/// when the spawn column would push a wide piece off the right edge.
pub const MIN_COLS: u16 = 4;

impl EngineConfig {
    /// Check the config, returning the first violated rule
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows < 1 {
            return Err(ConfigError::Rows);
        }
        if self.cols < MIN_COLS {
            return Err(ConfigError::Cols);
        }
        if self.cell_size < 1 {
            return Err(ConfigError::CellSize);
        }
        if !fits_in_units(self.rows, self.cell_size) || !fits_in_units(self.cols, self.cell_size) {
            return Err(ConfigError::TooLarge);
        }
        if !divides_cell(self.fall_distance, self.cell_size) {
            return Err(ConfigError::FallDistance);
        }
        if !divides_cell(self.fast_fall_distance, self.cell_size) {
            return Err(ConfigError::FastFallDistance);
        }
        Ok(())
    }

    /// Anchor of a freshly promoted piece: left of centre, one row down
    pub fn spawn_position(&self) -> Point {
        let col = (self.cols / 2).saturating_sub(1) as i32;
        Point::new(col * self.cell_size, self.cell_size)
    }
}

/// `cells` plus a margin of [`BOARD_MARGIN_CELLS`] still fits in `i32` units.
/// Pieces reach four cells above their anchor and hard drop adds one cell.
fn fits_in_units(cells: u16, cell_size: i32) -> bool {
    (cells as i32 + BOARD_MARGIN_CELLS)
        .checked_mul(cell_size)
        .is_some()
}

const BOARD_MARGIN_CELLS: i32 = 8;

fn divides_cell(distance: i32, cell_size: i32) -> bool {
    distance >= 1 && distance <= cell_size && cell_size % distance == 0
}

/// What a tick (or a hard drop) did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    pub locked: bool,
    pub lines_cleared: u32,
}

/// The simulation
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    board: Board,
    active: Piece,
    queued: Piece,
    generator: PieceGenerator,
    score: u32,
    lines: u32,
    soft_drop: bool,
}

impl Engine {
    /// Create an engine with a validated config and the given RNG seed
    pub fn new(config: EngineConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    /// Default config with the given seed
    pub fn with_seed(seed: u32) -> Self {
        Self::build(EngineConfig::default(), seed)
    }

    fn build(config: EngineConfig, seed: u32) -> Self {
        let board = Board::new(config.rows, config.cols, config.cell_size);
        let mut generator = PieceGenerator::new(seed);
        let active = Self::spawn_piece(&config, &board, generator.next_kind());
        let queued = Self::make_piece(&config, &board, generator.next_kind(), config.queued_position);

        Self {
            config,
            board,
            active,
            queued,
            generator,
            score: 0,
            lines: 0,
            soft_drop: false,
        }
    }

    fn make_piece(config: &EngineConfig, board: &Board, kind: PieceKind, at: Point) -> Piece {
        let mut piece = Piece::new(kind, at, board.geometry());
        piece.set_fall_distance(config.fall_distance);
        piece
    }

    fn spawn_piece(config: &EngineConfig, board: &Board, kind: PieceKind) -> Piece {
        let mut piece = Self::make_piece(config, board, kind, config.spawn_position());
        Self::move_to_spawn(config, board, &mut piece);
        piece
    }

    /// Put a piece at the spawn anchor, pulled left so it fits on narrow boards
    fn move_to_spawn(config: &EngineConfig, board: &Board, piece: &mut Piece) {
        let spawn = config.spawn_position();
        let x = spawn.x.min(board.width_px() - piece.width()).max(0);
        piece.move_to(x, spawn.y);
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> &Piece {
        &self.active
    }

    pub fn queued(&self) -> &Piece {
        &self.queued
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Total rows cleared
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn soft_drop(&self) -> bool {
        self.soft_drop
    }

    pub fn seed(&self) -> u32 {
        self.generator.seed()
    }

    /// Game over signal: a locked block reached row 0
    pub fn is_game_over(&self) -> bool {
        self.board.is_top_row_occupied()
    }

    /// Direct board access for scripted scenarios (tests, benches, replays)
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Replace the active piece, keeping the current fall distance
    pub fn set_active(&mut self, mut piece: Piece) {
        piece.set_fall_distance(self.fall_distance());
        self.active = piece;
    }

    fn fall_distance(&self) -> i32 {
        if self.soft_drop {
            self.config.fast_fall_distance
        } else {
            self.config.fall_distance
        }
    }

    /// Advance the simulation by one step
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();

        self.active.tick();

        let home = self.config.queued_position;
        self.queued.move_to(home.x, home.y);

        if self.board.piece_collides_down(&self.active) || self.active.y() >= self.board.height_px() {
            self.lock_active();
            report.locked = true;
        }

        report.lines_cleared = self.clear_full_rows();

        if self.active.is_landed() {
            self.promote_queued();
        }

        report
    }

    fn lock_active(&mut self) {
        let x = self.active.x();

        // Nothing underneath: the piece reached the floor between ticks.
        if !self.board.piece_collides_down(&self.active) {
            self.active.move_to(x, self.board.height_px());
        }

        // Snap to the row grid. Offsets are whole cells, so no block changes cell.
        let y = self.active.y();
        self.active.move_to(x, y - y.rem_euclid(self.config.cell_size));

        self.active.land();
        self.board.lock(&self.active);
    }

    /// Clear every full row, top to bottom. Returns how many were cleared.
    ///
    /// One pass suffices: after handling row `r`, rows `0..=r` hold no full row
    /// (the shift only moves already-scanned rows down), and rows below `r`
    /// are untouched.
    fn clear_full_rows(&mut self) -> u32 {
        let mut cleared = 0;
        for row in 0..self.board.rows() as usize {
            if self.board.row_is_full(row) {
                self.board.clear_row(row);
                self.board.shift_down(row);
                self.score = self.score.saturating_add(self.config.row_reward);
                cleared += 1;
            }
        }
        self.lines = self.lines.saturating_add(cleared);
        cleared
    }

    fn promote_queued(&mut self) {
        let kind = self.generator.next_kind();
        let fresh = Self::make_piece(&self.config, &self.board, kind, self.config.queued_position);
        let mut next = std::mem::replace(&mut self.queued, fresh);

        Self::move_to_spawn(&self.config, &self.board, &mut next);
        next.set_fall_distance(self.fall_distance());
        self.active = next;
    }

    pub fn move_left(&mut self) -> bool {
        if !self.board.can_move_left(&self.active) {
            return false;
        }
        self.active.left_move();
        true
    }

    pub fn move_right(&mut self) -> bool {
        if !self.board.can_move_right(&self.active) {
            return false;
        }
        self.active.right_move();
        true
    }

    /// Rotate to the next state, unless suppressed near the top or the new
    /// state would overlap locked blocks
    pub fn rotate_right(&mut self) -> bool {
        let mut candidate = self.active;
        if !candidate.rotate_right() || self.board.overlaps(&candidate) {
            return false;
        }
        self.active = candidate;
        true
    }

    /// Rotate to the previous state. See [`Engine::rotate_right`].
    pub fn rotate_left(&mut self) -> bool {
        let mut candidate = self.active;
        if !candidate.rotate_left() || self.board.overlaps(&candidate) {
            return false;
        }
        self.active = candidate;
        true
    }

    /// Switch the active piece (and later spawns) between the normal and the
    /// fast fall distance
    pub fn set_soft_drop(&mut self, on: bool) {
        self.soft_drop = on;
        let fall_distance = self.fall_distance();
        self.active.set_fall_distance(fall_distance);
    }

    /// Tick until the active piece locks
    ///
    /// Bounded: every tick moves the piece down by at least one unit, and it
    /// locks no later than when its anchor reaches the floor.
    pub fn hard_drop(&mut self) -> TickReport {
        let fall = self.active.fall_distance().max(1);
        let distance = (self.board.height_px() - self.active.y()).max(0) + self.config.cell_size;
        let budget = distance / fall + 2;

        let mut total = TickReport::default();
        for _ in 0..budget {
            let report = self.tick();
            total.lines_cleared += report.lines_cleared;
            if report.locked {
                total.locked = true;
                break;
            }
        }
        total
    }

    /// Apply a player command. Returns whether it had an effect.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::RotateRight => self.rotate_right(),
            Command::RotateLeft => self.rotate_left(),
            Command::SoftDropOn => {
                self.set_soft_drop(true);
                true
            }
            Command::SoftDropOff => {
                self.set_soft_drop(false);
                true
            }
            Command::HardDrop => self.hard_drop().locked,
        }
    }

    /// Start over on an empty board. The piece stream continues.
    pub fn reset(&mut self) {
        self.board.clear();
        self.score = 0;
        self.lines = 0;
        self.soft_drop = false;

        let kind = self.generator.next_kind();
        self.active = Self::spawn_piece(&self.config, &self.board, kind);
        let kind = self.generator.next_kind();
        self.queued = Self::make_piece(&self.config, &self.board, kind, self.config.queued_position);
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_seed(1)
    }
}
