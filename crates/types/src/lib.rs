//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, making them usable
//! from the simulation core, the input layer and the terminal renderer alike.
//!
//! # Units
//!
//! Positions are measured in *board units*. One cell is [`CELL_SIZE`] units
//! wide and tall, so a piece falling by [`NORMAL_FALL_DISTANCE`] per tick needs
//! `CELL_SIZE / NORMAL_FALL_DISTANCE` ticks to cross one row.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn column**: `cols / 2 - 1`, one cell below the top edge
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_INTERVAL_MS` | 20 | Simulation tick cadence |
//! | `SOFT_DROP_TICK_MS` | 0 | Tick cadence while soft drop is held (every frame) |
//! | `MOVE_INTERVAL_MS` | 60 | Lateral movement repeat cadence |
//! | `KEY_RELEASE_TIMEOUT_MS` | 150 | Synthetic key release for terminals without release events |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, Direction, PieceKind, BOARD_COLS, BOARD_ROWS};
//!
//! assert_eq!(PieceKind::from_str("bar"), Some(PieceKind::Bar));
//! assert_eq!(Direction::from_str("down"), Some(Direction::Down));
//! assert_eq!(Direction::from_str("up"), None);
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//!
//! assert_eq!(BOARD_COLS, 10);
//! assert_eq!(BOARD_ROWS, 20);
//! ```

/// Board width in cells
pub const BOARD_COLS: u16 = 10;

/// Board height in cells
pub const BOARD_ROWS: u16 = 20;

/// Edge length of one cell in board units
pub const CELL_SIZE: i32 = 16;

/// Distance a piece falls per tick
pub const NORMAL_FALL_DISTANCE: i32 = 2;

/// Distance a piece falls per tick while soft drop is held
pub const FAST_FALL_DISTANCE: i32 = 4;

/// Score awarded per cleared row
pub const ROW_CLEAR_REWARD: u32 = 10;

/// Off-board display position of the queued piece
pub const QUEUED_POSITION: Point = Point::new(10, -30);

/// Simulation tick cadence in milliseconds
pub const TICK_INTERVAL_MS: u32 = 20;

/// Tick cadence while soft drop is held (0 = every frame)
pub const SOFT_DROP_TICK_MS: u32 = 0;

/// Lateral movement repeat cadence in milliseconds
pub const MOVE_INTERVAL_MS: u32 = 60;

/// Held-key timeout for terminals that never report key releases
pub const KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Frame cadence of the terminal loop in milliseconds
pub const FRAME_MS: u32 = 16;


/// A position in board units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset by (dx, dy) board units
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// The seven piece variants
///
/// - **Square**: 2x2, a single rotation state
/// - **Bar**: 4 in a line
/// - **S** / **Z**: offset pairs, mirror images of each other
/// - **L** / **J**: 3 in a line with a foot, mirror images of each other
/// - **T**: 3 in a line with a centre nub
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Square,
    Bar,
    S,
    Z,
    L,
    J,
    T,
}

impl PieceKind {
    /// All variants in generator order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::Square,
        PieceKind::Bar,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::L,
        PieceKind::J,
        PieceKind::T,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("square"), Some(PieceKind::Square));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::Square));
    /// assert_eq!(PieceKind::from_str("I"), Some(PieceKind::Bar));
    /// assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "square" | "o" => Some(PieceKind::Square),
            "bar" | "i" => Some(PieceKind::Bar),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "t" => Some(PieceKind::T),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::Square => "square",
            PieceKind::Bar => "bar",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::T => "t",
        }
    }

    /// Single-letter label for compact displays
    pub fn letter(&self) -> &'static str {
        match self {
            PieceKind::Square => "O",
            PieceKind::Bar => "I",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::L => "L",
            PieceKind::J => "J",
            PieceKind::T => "T",
        }
    }
}

/// Direction of a collision query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Down,
    Left,
    Right,
}

impl Direction {
    /// Parse direction from string (case-insensitive)
    ///
    /// Unknown directions yield `None`; there is no "up" collision query.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Column step for lateral directions (0 for `Down`)
    pub fn dx(&self) -> i32 {
        match self {
            Direction::Down => 0,
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Player commands accepted by the engine
///
/// These are produced by the input layer and consumed by the loop driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate to the next rotation state
    RotateRight,
    /// Rotate to the previous rotation state
    RotateLeft,
    /// Start falling at the fast fall distance
    SoftDropOn,
    /// Return to the normal fall distance
    SoftDropOff,
    /// Tick until the active piece lands
    HardDrop,
}

impl Command {
    /// Parse command from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("rotate"), Some(Command::RotateRight));
    /// assert_eq!(Command::from_str("nope"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "rotate" | "rotateright" => Some(Command::RotateRight),
            "rotateleft" => Some(Command::RotateLeft),
            "softdropon" => Some(Command::SoftDropOn),
            "softdropoff" => Some(Command::SoftDropOff),
            "harddrop" => Some(Command::HardDrop),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::RotateRight => "rotateRight",
            Command::RotateLeft => "rotateLeft",
            Command::SoftDropOn => "softDropOn",
            Command::SoftDropOff => "softDropOff",
            Command::HardDrop => "hardDrop",
        }
    }
}
