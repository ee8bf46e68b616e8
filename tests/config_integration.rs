//! Configuration files driving engine behavior

mod common;

use envdash_rs::config::{resolve_config_path, AppConfig};
use envdash_rs::{Channel, Engine, FileSource};

#[test]
fn test_config_file_round_trip_drives_engine() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("envdash.toml");
    std::fs::write(
        &path,
        r#"
[buffer]
recent_capacity = 3

[ingest]
refresh_interval_ms = 0
"#,
    )
    .unwrap();

    let mut config = AppConfig::load(&path).unwrap();
    assert_eq!(config.buffer.recent_capacity, 3);
    // Unspecified sections keep their defaults
    assert_eq!(config.window.short_range_secs, 30.0);

    config.ingest.source_path = dir.path().join("data.csv");
    let source = FileSource::new(&config.ingest.source_path);

    let mut engine = Engine::new(&config, source.clone(), 0.0);
    for i in 1..=5 {
        // Payload lengths differ so each write changes the token
        source.publish(&format!("{},1,1,{}", i, "1".repeat(i))).unwrap();
        engine.tick(i as f64);
    }
    assert_eq!(engine.store().recent(Channel::Temperature).len(), 3);
    assert_eq!(engine.store().len(Channel::Temperature), 5);
}

#[test]
fn test_explicit_config_path_wins() {
    let explicit = std::path::Path::new("/tmp/explicit.toml");
    assert_eq!(
        resolve_config_path(Some(explicit)),
        Some(explicit.to_path_buf())
    );
}

#[test]
fn test_malformed_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("envdash.toml");
    std::fs::write(&path, "[buffer\nrecent_capacity = ").unwrap();
    assert!(AppConfig::load(&path).is_err());
}
