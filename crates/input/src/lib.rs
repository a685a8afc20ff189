//! Terminal input module (engine-facing).
//!
//! This crate is independent of the simulation. It maps `crossterm` key codes
//! into [`crate::types::Command`]s and tracks which keys are held between
//! frames in an explicit [`InputState`], so the loop driver can repeat lateral
//! moves at its own cadence. It works in terminals without key-release events.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::{HorizontalDirection, InputState};
pub use map::{command_for_code, handle_key_event, should_quit};
