//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;

use std::path::Path;

use envdash_rs::config::{AppConfig, LockConfig};

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}

/// Default configuration with the source and lock marker inside `dir`
pub fn config_in(dir: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.ingest.source_path = dir.join("sensor_data.csv");
    config.lock = LockConfig {
        lock_path: dir.join("envdash.lock"),
        reclaim_stale: false,
    };
    config
}
