//! # envdash-rs: Environmental Sensor Dashboard
//!
//! A live dashboard for a four-channel environmental sensor (temperature,
//! light, gas, humidity). A producer writes its latest reading as a
//! comma-separated line into a shared file; the dashboard polls the file's
//! modification time, decodes each new reading, buffers it per channel and
//! plots the selected channel over a short or long time window.
//!
//! ## Architecture
//!
//! - **Ingest**: change detection on the source file and payload decoding
//! - **Store**: per-channel recent ring buffer plus age-pruned history
//! - **Window**: projection of buffered samples into the visible time range
//! - **View**: active channel, display mode and session clock
//! - **Engine**: owns all of the above; driven by `tick` and `apply`
//! - **Frontend**: eframe/egui window rendering the engine with egui_plot
//! - **Instance**: lock marker so only one dashboard consumes the source;
//!   later starts hand their input over through the source file
//!
//! ## Configuration
//!
//! Settings are read from `envdash.toml` in the platform config directory
//! under `dev.envdash.envdash-rs`, or from the file named by `--config` or
//! `ENVDASH_CONFIG`. Defaults place the source file and lock marker in the
//! platform data directory:
//!
//! - **Linux**: `~/.local/share/dev.envdash.envdash-rs/`
//! - **macOS**: `~/Library/Application Support/dev.envdash.envdash-rs/`
//! - **Windows**: `%APPDATA%\dev.envdash.envdash-rs\`
//!
//! ## Example
//!
//! ```no_run
//! use envdash_rs::{AppConfig, Engine, FileSource, ViewCommand};
//!
//! let config = AppConfig::default();
//! let source = FileSource::new(&config.ingest.source_path);
//! let mut engine = Engine::new(&config, source, envdash_rs::unix_now());
//!
//! engine.tick(envdash_rs::unix_now());
//! engine.apply(ViewCommand::Next, envdash_rs::unix_now());
//! let frame = engine.frame(envdash_rs::unix_now());
//! println!("{}: {} points", frame.title, frame.points.len());
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod frontend;
pub mod ingest;
pub mod instance;
pub mod store;
pub mod types;
pub mod view;
pub mod window;

// Re-export commonly used types
pub use analysis::ChannelStatistics;
pub use config::AppConfig;
pub use engine::{unix_now, Engine, RenderFrame, TickReport};
pub use error::{DashError, Result};
pub use frontend::DashboardApp;
pub use ingest::{decode_payload, FileSource, IngestionPoller, PollOutcome, TelemetrySource};
pub use instance::{hand_off, Acquisition, InstanceGuard};
pub use store::SampleStore;
pub use types::{Channel, DisplayMode, Reading, Sample};
pub use view::{Transition, ViewCommand, ViewController};
pub use window::TimeWindowFilter;
