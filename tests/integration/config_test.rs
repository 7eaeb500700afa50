use procintel::core::config::{AnomalyConfig, Config};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.top_n, 10);
    assert_eq!(config.spike_threshold, 80);
    assert_eq!(config.disk_path, "/");
    assert_eq!(config.anomaly.sample_window_ms, 500);
}

#[test]
fn test_config_explicit_path_wins() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("procintel.json");
    fs::write(&path, r#"{"top_n": 4, "anomaly": {"memory_mb": 250.0}}"#).unwrap();

    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.top_n, 4);
    assert_eq!(config.anomaly.memory_mb, 250.0);
    assert_eq!(config.anomaly.cpu_percent, AnomalyConfig::default().cpu_percent);
}

#[test]
fn test_config_missing_explicit_file_is_default() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::load(Some(&temp_dir.path().join("absent.json"))).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.json");

    let config = Config {
        top_delay_secs: 0.25,
        disk_path: "/home".to_string(),
        ..Default::default()
    };
    config.save(&path).unwrap();

    assert_eq!(Config::load_from(&path).unwrap(), config);
}
