//! blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, the
//! integration tests and the benches import `blockfall::{core, driver, ...}`.
//! The [`config`] module loads the optional JSON config file.

pub mod config;

pub use blockfall_core as core;
pub use blockfall_driver as driver;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
