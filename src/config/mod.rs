//! Configuration module for envdash-rs
//!
//! This module handles application configuration including:
//! - Buffer sizing and retention
//! - Display window spans
//! - Ingestion source location and polling cadence
//! - Single-instance lock location
//! - UI and logging preferences
//!
//! # App Data Location
//!
//! Default files live in the platform-appropriate data directory:
//! - **Linux**: `~/.local/share/dev.envdash.envdash-rs/`
//! - **macOS**: `~/Library/Application Support/dev.envdash.envdash-rs/`
//! - **Windows**: `%APPDATA%\dev.envdash.envdash-rs\`
//!
//! # Files
//!
//! - `envdash.toml` - Configuration, read from the platform config directory
//! - `sensor_data.csv` - Default ingestion source
//! - `envdash.lock` - Default single-instance lock marker
//!
//! # Example
//!
//! ```ignore
//! use envdash_rs::config::AppConfig;
//!
//! let config = AppConfig::load("envdash.toml")?;
//! config.save("envdash.toml")?;
//! ```

use crate::error::{DashError, Result};
use crate::store::{DEFAULT_RECENT_CAPACITY, DEFAULT_RETENTION_SECS};
use crate::window::{DEFAULT_LONG_RANGE_SECS, DEFAULT_SHORT_RANGE_SECS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application identifier for data directories
pub const APP_ID: &str = "dev.envdash.envdash-rs";

/// Config filename
pub const CONFIG_FILE: &str = "envdash.toml";

/// Environment variable overriding the config file location
pub const CONFIG_ENV_VAR: &str = "ENVDASH_CONFIG";

/// Default ingestion source filename
pub const DEFAULT_SOURCE_FILE: &str = "sensor_data.csv";

/// Default lock marker filename
pub const DEFAULT_LOCK_FILE: &str = "envdash.lock";

/// Default polling interval in milliseconds
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Default minimum interval between data-driven redraws in milliseconds
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 500;

// ==================== App Data Directory ====================

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Get the application config directory path
pub fn app_config_dir() -> Option<PathBuf> {
    dirs_next::config_dir().map(|p| p.join(APP_ID))
}

/// Ensure the app data directory exists
pub fn ensure_app_data_dir() -> Result<PathBuf> {
    let dir = app_data_dir().ok_or_else(|| {
        DashError::Config("Could not determine app data directory".to_string())
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| {
            DashError::Config(format!("Failed to create app data directory: {}", e))
        })?;
    }

    Ok(dir)
}

/// Path inside the data directory, falling back to the working directory
fn data_file(name: &str) -> PathBuf {
    app_data_dir()
        .map(|dir| dir.join(name))
        .unwrap_or_else(|| PathBuf::from(name))
}

/// Resolve which config file to read
///
/// `explicit` comes from `--config` or `ENVDASH_CONFIG`; without it the
/// platform config directory is used.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => app_config_dir().map(|dir| dir.join(CONFIG_FILE)),
    }
}

// ==================== App Config ====================

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub buffer: BufferConfig,

    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub ingest: IngestConfig,

    #[serde(default)]
    pub lock: LockConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load config from a TOML file
    ///
    /// A missing file yields defaults; a malformed file is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| DashError::Config(format!("Failed to read {:?}: {}", path, e)))?;

        Self::from_toml(&content)
            .map_err(|e| e.with_context(format!("Failed to load {:?}", path)))
    }

    /// Parse config from TOML text and validate it
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| DashError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config as TOML
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| DashError::Serialization(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path.as_ref(), content)
            .map_err(|e| DashError::Config(format!("Failed to write config: {}", e)))
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.buffer.recent_capacity == 0 {
            return Err(DashError::Config(
                "buffer.recent_capacity must be at least 1".to_string(),
            ));
        }
        if !(self.buffer.retention_secs > 0.0) {
            return Err(DashError::Config(
                "buffer.retention_secs must be positive".to_string(),
            ));
        }
        if !(self.window.short_range_secs > 0.0) || !(self.window.long_range_secs > 0.0) {
            return Err(DashError::Config(
                "window spans must be positive".to_string(),
            ));
        }
        if self.ingest.poll_interval_ms == 0 {
            return Err(DashError::Config(
                "ingest.poll_interval_ms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

// ==================== Buffer Config ====================

/// Sample buffer sizing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BufferConfig {
    /// Capacity of the per-channel recent window
    pub recent_capacity: usize,

    /// History retention horizon in seconds
    pub retention_secs: f64,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            recent_capacity: DEFAULT_RECENT_CAPACITY,
            retention_secs: DEFAULT_RETENTION_SECS,
        }
    }
}

// ==================== Window Config ====================

/// Display window spans
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Span of the short-range view in seconds
    pub short_range_secs: f64,

    /// Span of the long-range view in seconds
    pub long_range_secs: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            short_range_secs: DEFAULT_SHORT_RANGE_SECS,
            long_range_secs: DEFAULT_LONG_RANGE_SECS,
        }
    }
}

// ==================== Ingest Config ====================

/// Ingestion source and polling cadence
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IngestConfig {
    /// File the sensor producer writes readings to
    pub source_path: PathBuf,

    /// How often the source's modification time is checked
    pub poll_interval_ms: u64,

    /// Minimum interval between data-driven redraws
    pub refresh_interval_ms: u64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            source_path: data_file(DEFAULT_SOURCE_FILE),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
        }
    }
}

impl IngestConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }
}

// ==================== Lock Config ====================

/// Single-instance lock settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LockConfig {
    /// Marker file whose existence signals an active instance
    pub lock_path: PathBuf,

    /// Reclaim a marker whose recorded process is no longer running.
    /// Off by default: an existing marker always means hand-off.
    pub reclaim_stale: bool,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            lock_path: data_file(DEFAULT_LOCK_FILE),
            reclaim_stale: false,
        }
    }
}

// ==================== UI Config ====================

/// UI configuration for plotting and display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// Enable dark mode
    pub dark_mode: bool,

    /// Show grid on plots
    pub show_grid: bool,

    /// Plot line width in pixels
    pub line_width: f32,

    /// Initial window width
    pub window_width: f32,

    /// Initial window height
    pub window_height: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            dark_mode: true,
            show_grid: true,
            line_width: 1.5,
            window_width: 1024.0,
            window_height: 640.0,
        }
    }
}

// ==================== Logging Config ====================

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write logs to a daily-rolling file in the app data directory
    pub log_to_file: bool,

    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: Option<String>,
}

// ==================== Tests ====================
