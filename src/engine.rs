//! Engine context
//!
//! [`Engine`] owns everything the dashboard loop mutates: the sample store,
//! the view controller, the ingestion poller and its source. A front end
//! drives it with two calls:
//!
//! - [`Engine::tick`] once per loop iteration to pick up new readings
//! - [`Engine::apply`] for every user command
//!
//! and renders whatever [`Engine::frame`] returns. All methods take the
//! current wall-clock time explicitly so the engine is deterministic under
//! test.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::analysis::ChannelStatistics;
use crate::config::AppConfig;
use crate::ingest::{FileSource, IngestionPoller, PollOutcome, TelemetrySource};
use crate::store::SampleStore;
use crate::types::{Channel, DisplayMode, Sample};
use crate::view::{Transition, ViewCommand, ViewController};
use crate::window::TimeWindowFilter;

/// Current wall-clock time in seconds since the Unix epoch
pub fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    /// Channel name and ordinal, e.g. `Gas (3/4)`
    pub title: String,
    pub channel: Channel,
    pub mode: DisplayMode,
    /// Projected `(time, value)` points, oldest first
    pub points: Vec<[f64; 2]>,
    /// Fixed x-axis bounds for the mode
    pub x_range: (f64, f64),
    /// Most recent sample of the channel
    pub latest: Option<Sample>,
    /// Summary of the channel's full history
    pub stats: Option<ChannelStatistics>,
}

/// Ingestion result plus whether a redraw is due
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub outcome: PollOutcome,
    pub redraw: bool,
}

/// The dashboard's state and the operations that mutate it
#[derive(Debug)]
pub struct Engine<S: TelemetrySource = FileSource> {
    store: SampleStore,
    filter: TimeWindowFilter,
    view: ViewController,
    poller: IngestionPoller,
    source: S,
    status: String,
}

impl<S: TelemetrySource> Engine<S> {
    /// Create an engine whose session starts at `now`
    pub fn new(config: &AppConfig, source: S, now: f64) -> Self {
        tracing::info!(
            source = %source.describe(),
            recent_capacity = config.buffer.recent_capacity,
            retention_secs = config.buffer.retention_secs,
            "Starting session"
        );
        Self {
            store: SampleStore::from_config(&config.buffer),
            filter: TimeWindowFilter::from_config(&config.window),
            view: ViewController::new(now),
            poller: IngestionPoller::from_config(&config.ingest),
            source,
            status: "Waiting for data".to_string(),
        }
    }

    /// Poll the source once
    ///
    /// Readings are stamped relative to the session start. A wall clock that
    /// stepped back behind the start stamps them at zero.
    pub fn tick(&mut self, now: f64) -> TickReport {
        let elapsed = self.view.state().elapsed(now);
        let outcome = self.poller.tick(&self.source, &mut self.store, elapsed, now);
        match &outcome {
            PollOutcome::Applied { reading, .. } => {
                self.status = format!("Received {}", reading.to_payload());
            }
            PollOutcome::Rejected { error } => {
                self.status = format!("Discarded payload: {}", error);
            }
            PollOutcome::SourceError { error } => {
                self.status = format!("Source unavailable: {}", error);
            }
            PollOutcome::SourceMissing => {
                self.status = format!("Waiting for {}", self.source.describe());
            }
            PollOutcome::Unchanged => {}
        }
        let redraw = outcome.redraw();
        TickReport { outcome, redraw }
    }

    /// Apply a user command
    pub fn apply(&mut self, command: ViewCommand, now: f64) -> Transition {
        let transition = self.view.apply(command, &mut self.store, now);
        if command == ViewCommand::Reset {
            self.status = "Session reset".to_string();
        }
        transition
    }

    /// Build the renderable view of the active channel
    pub fn frame(&self, now: f64) -> RenderFrame {
        let channel = self.view.active_channel();
        let mode = self.view.display_mode();
        let elapsed = self.view.state().elapsed(now);
        RenderFrame {
            title: self.view.title(),
            channel,
            mode,
            points: self.store.windowed(channel, &self.filter, mode, elapsed),
            x_range: self.filter.visible_range(mode),
            latest: self.store.latest(channel),
            stats: ChannelStatistics::summarize(self.store.history(channel)),
        }
    }

    pub fn store(&self) -> &SampleStore {
        &self.store
    }

    pub fn view(&self) -> &ViewController {
        &self.view
    }

    pub fn poller(&self) -> &IngestionPoller {
        &self.poller
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Last user-facing status message
    pub fn status(&self) -> &str {
        &self.status
    }
}
