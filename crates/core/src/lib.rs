//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the simulation: the grid and its collision model, the
//! piece state machine and the tick/line-clear algorithm. It has **no**
//! dependencies on terminals, timers or I/O, so it is:
//!
//! - **Deterministic**: the same seed produces the same piece stream
//! - **Testable**: every rule is reachable through plain method calls
//! - **Portable**: the loop driver and renderer are separate crates
//!
//! # Module Structure
//!
//! - [`shapes`]: rotation-state tables (offsets, widths, edge block sets)
//! - [`piece`]: [`Block`] and the falling [`Piece`]
//! - [`board`]: the cell grid, collision queries, row clear and row shift
//! - [`rng`]: seeded uniform piece generator
//! - [`engine`]: the tick state machine and player command surface
//!
//! # Example
//!
//! ```
//! use blockfall_core::Engine;
//! use blockfall_core::types::Command;
//!
//! let mut engine = Engine::with_seed(12345);
//!
//! engine.apply(Command::MoveRight);
//! let locked = engine.apply(Command::HardDrop);
//! assert!(locked);
//! assert_eq!(engine.board().filled_count(), 4);
//!
//! // Game over is a board query, polled by the caller.
//! assert!(!engine.board().is_top_row_occupied());
//! ```

pub mod board;
pub mod engine;
pub mod piece;
pub mod rng;
pub mod shapes;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Cell, CellIndex};
pub use engine::{ConfigError, Engine, EngineConfig, TickReport, MIN_COLS};
pub use piece::{Block, Geometry, Piece};
pub use rng::{PieceGenerator, SimpleRng};
pub use shapes::{states, RotationState};
