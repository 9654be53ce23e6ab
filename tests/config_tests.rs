// SPDX-License-Identifier: MPL-2.0

//! Integration tests for configuration module

use hwaccel::Config;
use hwaccel::constants::DeintRate;
use hwaccel::errors::ConfigError;
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("hwaccel-{}-{}", uuid::Uuid::new_v4(), name))
}

#[test]
fn test_config_default() {
    let config = Config::default();

    assert!(config.enabled, "Hardware acceleration should be enabled by default");
    assert!(config.vaapi.enabled, "VA-API should be enabled by default");
    assert_eq!(config.filter_max_len, 512);
    assert_eq!(config.vaapi.device, PathBuf::from("/dev/dri/renderD128"));
}

#[test]
fn test_config_load_from_file() {
    let path = temp_path("config.json");
    std::fs::write(
        &path,
        r#"{"filter_max_len": 128, "vaapi": {"deint_rate": "field", "deint_auto": false}}"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.filter_max_len, 128);
    assert_eq!(config.vaapi.deint_rate, DeintRate::Field);
    assert!(!config.vaapi.deint_auto);
    assert!(config.vaapi.enabled, "Unset fields keep their defaults");
}

#[test]
fn test_config_missing_file() {
    let path = temp_path("missing.json");

    assert!(matches!(Config::load(&path), Err(ConfigError::Io(_))));
    assert_eq!(Config::load_or_default(&path).unwrap(), Config::default());
}

#[test]
fn test_config_invalid_file_is_error() {
    let path = temp_path("broken.json");
    std::fs::write(&path, "enabled = true").unwrap();

    let result = Config::load_or_default(&path);
    std::fs::remove_file(&path).ok();

    assert!(
        matches!(result, Err(ConfigError::Parse(_))),
        "An existing but malformed file must not silently fall back"
    );
}

#[test]
fn test_config_json_round_trip() {
    let mut config = Config::default();
    config.enabled = false;
    config.vaapi.device = PathBuf::from("/dev/dri/renderD129");

    let json = config.to_json().unwrap();
    assert_eq!(Config::from_json(&json).unwrap(), config);
}

#[test]
fn test_default_path_location() {
    if let Some(path) = Config::default_path() {
        assert!(path.ends_with("hwaccel/config.json"));
    }
}
