//! Environmental Sensor Dashboard - Main Entry Point
//!
//! Starts the dashboard, or hands the given reading over to an already
//! running instance.

use anyhow::Context;
use clap::Parser;
use envdash_rs::{
    cli::CliArgs,
    config::{self, AppConfig, LoggingConfig},
    error::DashError,
    frontend::DashboardApp,
    hand_off, unix_now, Acquisition, Engine, FileSource, InstanceGuard,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "info,envdash_rs=debug";
const LOG_FILE_PREFIX: &str = "envdash.log";
const APP_NAME: &str = "Environmental Sensor Dashboard";

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let config = match config::resolve_config_path(args.config.as_deref()) {
        Some(path) => AppConfig::load(&path)
            .with_context(|| format!("Failed to load configuration from {:?}", path))?,
        None => AppConfig::default(),
    };

    // Keep the file writer alive until exit so buffered lines are flushed
    let _log_guard = init_logging(&config.logging);

    tracing::info!("Starting {}", APP_NAME);

    let source = FileSource::new(&config.ingest.source_path);

    match InstanceGuard::acquire(&config.lock)? {
        Acquisition::HandOff { holder } => {
            if let Some(holder) = holder {
                tracing::info!(
                    pid = holder.pid,
                    started_at = %holder.started_at,
                    "Dashboard already running"
                );
            }
            hand_off(&source, args.payload.as_deref())?;
            Ok(())
        }
        Acquisition::Acquired(guard) => {
            let result = run_dashboard(config, source, args.payload.as_deref());
            if let Err(e) = &result {
                tracing::error!("{:#}", e);
            }
            guard.release()?;
            tracing::info!("Shutting down...");
            result
        }
    }
}

fn run_dashboard(config: AppConfig, source: FileSource, payload: Option<&str>) -> anyhow::Result<()> {
    source.ensure_exists()?;
    if let Some(payload) = payload {
        source.publish(payload)?;
    }

    let engine = Engine::new(&config, source, unix_now());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.ui.window_width, config.ui.window_height])
            .with_min_inner_size([480.0, 320.0])
            .with_title(APP_NAME),
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, engine, &config)))),
    )
    .map_err(|e| DashError::Render(e.to_string()))?;

    Ok(())
}

/// Install the tracing subscriber
///
/// `RUST_LOG` wins over the configured filter. File logging failures are
/// reported on stderr and do not stop the dashboard.
fn init_logging(logging: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        logging
            .filter
            .as_deref()
            .and_then(|directive| EnvFilter::try_new(directive).ok())
            .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
    });

    let (file_layer, guard) = if logging.log_to_file {
        match config::ensure_app_data_dir() {
            Ok(dir) => {
                let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
                let (writer, guard) = tracing_appender::non_blocking(appender);
                (
                    Some(fmt::layer().with_writer(writer).with_ansi(false)),
                    Some(guard),
                )
            }
            Err(e) => {
                eprintln!("File logging disabled: {}", e);
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    guard
}
