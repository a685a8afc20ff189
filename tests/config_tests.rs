//! Config file tests: defaults, partial overrides, validation

use std::fs;

use blockfall::config::AppConfig;
use blockfall::core::EngineConfig;
use blockfall::driver::DriverConfig;

#[test]
fn test_defaults_are_valid() {
    let config = AppConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.engine_config(), EngineConfig::default());
    assert_eq!(config.driver_config(), DriverConfig::default());
    assert_eq!(config.seed, None);
}

#[test]
fn test_partial_json_merges_over_defaults() {
    let config = AppConfig::from_json(
        r#"{
            "rows": 24,
            "tick_interval_ms": 40,
            "seed": 99
        }"#,
    )
    .unwrap();

    assert_eq!(config.rows, 24);
    assert_eq!(config.tick_interval_ms, 40);
    assert_eq!(config.seed, Some(99));
    assert_eq!(config.cols, AppConfig::default().cols);
    assert_eq!(config.move_interval_ms, AppConfig::default().move_interval_ms);

    let driver = config.build_driver(99).unwrap();
    assert_eq!(driver.engine().board().rows(), 24);
    assert_eq!(driver.config().tick_interval_ms, 40);
}

#[test]
fn test_invalid_fall_distance_is_rejected() {
    let config = AppConfig::from_json(r#"{ "fall_distance": 5 }"#).unwrap();
    let err = config.validate().unwrap_err();
    assert!(format!("{:#}", err).contains("fall_distance"));
    assert!(config.build_driver(1).is_err());
}

#[test]
fn test_narrow_board_is_rejected() {
    let config = AppConfig::from_json(r#"{ "cols": 3 }"#).unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_oversized_cells_are_rejected_before_building() {
    let config = AppConfig::from_json(
        r#"{
            "cell_size": 268435456,
            "fall_distance": 134217728,
            "fast_fall_distance": 134217728
        }"#,
    )
    .unwrap();
    let err = config.validate().unwrap_err();
    assert!(format!("{:#}", err).contains("cell_size"));
    assert!(config.build_driver(1).is_err());
}

#[test]
fn test_malformed_json_is_an_error() {
    assert!(AppConfig::from_json("{ rows: 20 }").is_err());
    assert!(AppConfig::from_json(r#"{ "rows": -1 }"#).is_err());
}

#[test]
fn test_load_from_file() {
    let path = std::env::temp_dir().join(format!("blockfall-config-{}.json", std::process::id()));
    fs::write(&path, r#"{ "cols": 12, "key_release_timeout_ms": 80 }"#).unwrap();

    let config = AppConfig::load(&path).unwrap();
    fs::remove_file(&path).unwrap();
    assert_eq!(config.cols, 12);
    assert_eq!(config.key_release_timeout_ms, 80);

    let driver = config.build_driver(3).unwrap();
    assert_eq!(driver.input().key_release_timeout_ms(), 80);
}

#[test]
fn test_missing_file_mentions_path() {
    let err = AppConfig::load(std::path::Path::new("/nonexistent/blockfall.json")).unwrap_err();
    assert!(format!("{:#}", err).contains("/nonexistent/blockfall.json"));
}
