//! Last rendered frame, rebuilt only when something visible changed
//!
//! Ingestion runs on every repaint, but a burst of readings should not redraw
//! the plot more than once per refresh interval. The cache keeps the frame
//! from the last redraw and replaces it when the engine reports that a
//! data-driven redraw is due or a user command changed the view.

use crate::engine::{Engine, RenderFrame, TickReport};
use crate::ingest::TelemetrySource;

/// Whether the cached frame is out of date after a tick and its commands
pub fn needs_rebuild(report: &TickReport, commands_changed_view: bool) -> bool {
    report.redraw || commands_changed_view
}

#[derive(Debug, Clone)]
pub struct FrameCache {
    frame: RenderFrame,
}

impl FrameCache {
    pub fn new<S: TelemetrySource>(engine: &Engine<S>, now: f64) -> Self {
        Self {
            frame: engine.frame(now),
        }
    }

    /// Rebuild the frame if needed; returns whether it was rebuilt
    pub fn refresh<S: TelemetrySource>(
        &mut self,
        engine: &Engine<S>,
        report: &TickReport,
        commands_changed_view: bool,
        now: f64,
    ) -> bool {
        if !needs_rebuild(report, commands_changed_view) {
            return false;
        }
        self.frame = engine.frame(now);
        true
    }

    pub fn frame(&self) -> &RenderFrame {
        &self.frame
    }
}
