//! Tests for Shuttle.toml handling.

use csa_utils::ShuttleConfig;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn read_config(path: &Path) -> ShuttleConfig {
    toml::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_config_save_writes_single_name_line() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("Shuttle.toml");

    ShuttleConfig::new("my-app-0a1b2c").save(&config_path).unwrap();

    let contents = fs::read_to_string(&config_path).unwrap();
    assert_eq!(contents.trim_end(), "name = \"my-app-0a1b2c\"");
}

#[test]
fn test_config_save_round_trips_through_toml() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("Shuttle.toml");

    let config = ShuttleConfig::new("test-project");
    config.save(&config_path).unwrap();

    assert_eq!(read_config(&config_path), config);
}

#[test]
fn test_config_save_replaces_template_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("Shuttle.toml");
    fs::write(&config_path, "name = \"static-next-server\"\n").unwrap();

    ShuttleConfig::new("fresh").save(&config_path).unwrap();

    assert_eq!(read_config(&config_path).name, "fresh");
}

#[test]
fn test_config_save_into_missing_directory() {
    let temp_dir = TempDir::new().unwrap();
    let err = ShuttleConfig::new("app")
        .save(temp_dir.path().join("backend/Shuttle.toml"))
        .unwrap_err();
    assert!(err.to_string().starts_with("Failed to write"));
}
