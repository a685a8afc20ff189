//! Terminal "game renderer" module.
//!
//! Renders into a simple framebuffer that is flushed to the terminal, without
//! a widget/layout library.
//!
//! - [`fb`]: styled character framebuffer
//! - [`game_view`]: pure engine -> framebuffer mapping (testable without a tty)
//! - [`renderer`]: crossterm backend with diff flushing

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, SessionView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
