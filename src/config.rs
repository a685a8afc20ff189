//! Runtime configuration.
//!
//! Every field is optional in the JSON file; missing fields keep their
//! compiled-in defaults. The CLI may override the seed afterwards.
//!
//! ```
//! use blockfall::config::AppConfig;
//!
//! let config = AppConfig::from_json(r#"{ "cols": 12, "seed": 7 }"#).unwrap();
//! assert_eq!(config.cols, 12);
//! assert_eq!(config.rows, 20);
//! assert_eq!(config.seed, Some(7));
//! ```

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{Engine, EngineConfig};
use crate::driver::{DriverConfig, LoopDriver};
use crate::input::InputState;
use crate::types::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub rows: u16,
    pub cols: u16,
    pub cell_size: i32,
    pub fall_distance: i32,
    pub fast_fall_distance: i32,
    pub row_reward: u32,
    pub tick_interval_ms: u32,
    pub soft_drop_tick_ms: u32,
    pub move_interval_ms: u32,
    pub key_release_timeout_ms: u32,
    /// Piece stream seed; random when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rows: BOARD_ROWS,
            cols: BOARD_COLS,
            cell_size: CELL_SIZE,
            fall_distance: NORMAL_FALL_DISTANCE,
            fast_fall_distance: FAST_FALL_DISTANCE,
            row_reward: ROW_CLEAR_REWARD,
            tick_interval_ms: TICK_INTERVAL_MS,
            soft_drop_tick_ms: SOFT_DROP_TICK_MS,
            move_interval_ms: MOVE_INTERVAL_MS,
            key_release_timeout_ms: KEY_RELEASE_TIMEOUT_MS,
            seed: None,
        }
    }
}

impl AppConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parse config JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("load config file {}", path.display()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serialize config")
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            rows: self.rows,
            cols: self.cols,
            cell_size: self.cell_size,
            fall_distance: self.fall_distance,
            fast_fall_distance: self.fast_fall_distance,
            row_reward: self.row_reward,
            ..EngineConfig::default()
        }
    }

    pub fn driver_config(&self) -> DriverConfig {
        DriverConfig {
            tick_interval_ms: self.tick_interval_ms,
            soft_drop_tick_ms: self.soft_drop_tick_ms,
            move_interval_ms: self.move_interval_ms,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.engine_config()
            .validate()
            .context("invalid engine configuration")?;
        if self.tick_interval_ms == 0 {
            bail!("tick_interval_ms must be at least 1");
        }
        Ok(())
    }

    /// Build a validated driver with a fresh engine seeded with `seed`
    pub fn build_driver(&self, seed: u32) -> Result<LoopDriver> {
        self.validate()?;
        let engine = Engine::new(self.engine_config(), seed).context("create engine")?;
        let input = InputState::new().with_key_release_timeout_ms(self.key_release_timeout_ms);
        Ok(LoopDriver::new(engine, input, self.driver_config()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trips_through_json() {
        let config = AppConfig::default();
        let json = config.to_json().unwrap();
        assert!(!json.contains("seed"));
        assert_eq!(AppConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert!(AppConfig::from_json(r#"{ "colums": 12 }"#).is_err());
    }

    #[test]
    fn test_zero_tick_interval_is_rejected() {
        let config = AppConfig {
            tick_interval_ms: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
