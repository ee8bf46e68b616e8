//! Frontend module for the dashboard window
//!
//! [`DashboardApp`] drives an [`Engine`] from egui's frame loop:
//!
//! 1. `tick` the engine to pick up new readings
//! 2. collect commands from the keyboard and the toolbar and apply them
//! 3. render the toolbar, the status bar and the channel plot
//!
//! egui redraws on input; while idle the app asks for a repaint after the
//! poll interval so ingestion keeps running. The plot shows the cached
//! [`FrameCache`] frame, which only changes when the engine marks a
//! data-driven redraw as due or a command changed the view. The status bar
//! is always live.

pub mod frame_cache;
pub mod plot;
pub mod status_bar;
pub mod toolbar;

use std::time::Duration;

use crate::config::AppConfig;
use crate::engine::{unix_now, Engine};
use crate::ingest::TelemetrySource;
use crate::view::Transition;

pub use frame_cache::{needs_rebuild, FrameCache};
pub use plot::ChannelPlot;
use status_bar::{render_status_bar, StatusBarContext};
use toolbar::{keyboard_commands, render_toolbar, ToolbarContext};

/// The dashboard window
pub struct DashboardApp<S: TelemetrySource> {
    engine: Engine<S>,
    frames: FrameCache,
    plot: ChannelPlot,
    poll_interval: Duration,
    source_label: String,
    quitting: bool,
}

impl<S: TelemetrySource> DashboardApp<S> {
    pub fn new(cc: &eframe::CreationContext<'_>, engine: Engine<S>, config: &AppConfig) -> Self {
        if config.ui.dark_mode {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
        } else {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
        }

        let source_label = engine.source().describe();
        let frames = FrameCache::new(&engine, unix_now());
        Self {
            engine,
            frames,
            plot: ChannelPlot::from_config(&config.ui),
            poll_interval: config.ingest.poll_interval(),
            source_label,
            quitting: false,
        }
    }

    pub fn engine(&self) -> &Engine<S> {
        &self.engine
    }
}

impl<S: TelemetrySource> eframe::App for DashboardApp<S> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = unix_now();

        let report = self.engine.tick(now);

        let mut commands = keyboard_commands(ctx);

        let mode = self.engine.view().display_mode();
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            commands.extend(render_toolbar(ui, &ToolbarContext { mode }));
        });

        let mut changed = false;
        for command in commands {
            match self.engine.apply(command, now) {
                Transition::Redraw => changed = true,
                Transition::Quit => self.quitting = true,
            }
        }

        if self.quitting {
            tracing::info!("Quit requested");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        if self.frames.refresh(&self.engine, &report, changed, now) {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            render_status_bar(
                ui,
                &StatusBarContext {
                    source: &self.source_label,
                    applied: self.engine.poller().applied_count(),
                    rejected: self.engine.poller().rejected_count(),
                    message: self.engine.status(),
                },
            );
        });

        let render = self.frames.frame();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(&render.title);
            self.plot.render(ui, render);
        });

        ctx.request_repaint_after(self.poll_interval);
    }
}
