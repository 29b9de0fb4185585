//! Loading configuration from disk.

use std::sync::Arc;
use std::time::Duration;

use judge_console::net::MemorySession;
use judge_console::{ConfigError, ConsoleConfig};

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("console.toml");
    std::fs::write(
        &path,
        r#"
        [api]
        base_url = "https://judge.example.com/api/"
        timeout_ms = 8000
        user_agent = "judge-console-tests"

        [list]
        debounce_ms = 300
        "#,
    )
    .unwrap();

    let config = ConsoleConfig::load(&path).unwrap();
    assert_eq!(config.timeout(), Duration::from_secs(8));
    assert_eq!(config.list_options().debounce, Duration::from_millis(300));
    assert_eq!(config.list.default_limit, 10);

    let client = config.rest_client(Arc::new(MemorySession::new())).unwrap();
    assert_eq!(client.base_url(), "https://judge.example.com/api");
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = ConsoleConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.toml");

    let mut config = ConsoleConfig::default();
    config.api.base_url = "https://staging.judge.example.com/api".into();
    config.list.default_limit = 50;
    config.save(&path).unwrap();

    assert_eq!(ConsoleConfig::load(&path).unwrap(), config);
}

#[test]
fn test_empty_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.toml");
    std::fs::write(&path, "").unwrap();

    assert_eq!(ConsoleConfig::load(&path).unwrap(), ConsoleConfig::default());
}
