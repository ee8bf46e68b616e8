//! Plot rendering module using egui_plot
//!
//! Draws the active channel over the fixed x-range of the display mode. The
//! y-range follows the visible points. Two overlays sit on the plot area:
//! the latest value at the top left, history statistics at the top right.
//!
//! The plot itself is not interactive; navigation happens through
//! [`ViewCommand`](crate::view::ViewCommand)s only.

use egui::{Align2, Color32, RichText, Ui};
use egui_plot::{Line, Plot, PlotBounds, PlotPoints};

use crate::analysis::ChannelStatistics;
use crate::config::UiConfig;
use crate::engine::RenderFrame;
use crate::types::{Channel, Sample};

/// Y-range used when there is nothing to show
const EMPTY_Y_RANGE: (f64, f64) = (0.0, 1.0);

/// Fraction of the data span added above and below
const Y_MARGIN: f64 = 0.1;

/// Plot display settings
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelPlot {
    pub show_grid: bool,
    pub line_width: f32,
}

impl Default for ChannelPlot {
    fn default() -> Self {
        Self {
            show_grid: true,
            line_width: 1.5,
        }
    }
}

impl ChannelPlot {
    pub fn from_config(config: &UiConfig) -> Self {
        Self {
            show_grid: config.show_grid,
            line_width: config.line_width,
        }
    }

    /// Render the plot and its overlays
    pub fn render(&self, ui: &mut Ui, frame: &RenderFrame) {
        let channel = frame.channel;
        let (x_min, x_max) = frame.x_range;
        let (y_min, y_max) = y_bounds(&frame.points);

        let plot = Plot::new("channel_plot")
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .show_axes(true)
            .show_grid(self.show_grid)
            .x_axis_label("Time (s)")
            .y_axis_label(format!("{} ({})", channel.display_name(), channel.unit()));

        let line_width = self.line_width;
        let response = plot.show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max([x_min, y_min], [x_max, y_max]));

            if !frame.points.is_empty() {
                let line = Line::new(
                    channel.display_name(),
                    PlotPoints::from(frame.points.clone()),
                )
                .color(channel_color(channel))
                .width(line_width);
                plot_ui.line(line);
            }
        });

        let rect = response.response.rect;
        let ctx = ui.ctx().clone();

        egui::Area::new(egui::Id::new("latest_overlay"))
            .order(egui::Order::Foreground)
            .fixed_pos(rect.left_top() + egui::vec2(60.0, 8.0))
            .interactable(false)
            .show(&ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    render_latest(ui, channel, frame.latest);
                });
            });

        egui::Area::new(egui::Id::new("stats_overlay"))
            .order(egui::Order::Foreground)
            .pivot(Align2::RIGHT_TOP)
            .fixed_pos(rect.right_top() + egui::vec2(-8.0, 8.0))
            .interactable(false)
            .show(&ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    render_stats(ui, channel, frame.stats.as_ref());
                });
            });
    }
}

fn render_latest(ui: &mut Ui, channel: Channel, latest: Option<Sample>) {
    match latest {
        Some(sample) => {
            ui.label(
                RichText::new(format!("{:.2} {}", sample.value, channel.unit()))
                    .size(22.0)
                    .color(channel_color(channel)),
            );
            ui.label(RichText::new(format!("at {:.1} s", sample.timestamp)).small().weak());
        }
        None => {
            ui.label(RichText::new("No data").weak());
        }
    }
}

fn render_stats(ui: &mut Ui, channel: Channel, stats: Option<&ChannelStatistics>) {
    let Some(stats) = stats else {
        ui.label(RichText::new("No statistics").weak());
        return;
    };
    let unit = channel.unit();
    egui::Grid::new("stats_grid")
        .num_columns(2)
        .spacing([12.0, 2.0])
        .show(ui, |ui| {
            for (name, value) in [
                ("Min", stats.min),
                ("Max", stats.max),
                ("Mean", stats.mean),
                ("Std dev", stats.std_dev),
            ] {
                ui.label(RichText::new(name).small());
                ui.label(RichText::new(format!("{:.2} {}", value, unit)).small().monospace());
                ui.end_row();
            }
            ui.label(RichText::new("Samples").small());
            ui.label(RichText::new(stats.count.to_string()).small().monospace());
            ui.end_row();
        });
}

fn channel_color(channel: Channel) -> Color32 {
    let [r, g, b, a] = channel.color();
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// Y-axis bounds covering `points` with a margin
pub fn y_bounds(points: &[[f64; 2]]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for [_, y] in points {
        min = min.min(*y);
        max = max.max(*y);
    }

    if !min.is_finite() || !max.is_finite() {
        return EMPTY_Y_RANGE;
    }

    let span = max - min;
    if span <= f64::EPSILON {
        // Flat line: center it with a unit margin
        let pad = (min.abs() * Y_MARGIN).max(1.0);
        return (min - pad, max + pad);
    }

    let pad = span * Y_MARGIN;
    (min - pad, max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_y_bounds_empty() {
        assert_eq!(y_bounds(&[]), EMPTY_Y_RANGE);
    }

    #[test]
    fn test_y_bounds_adds_margin() {
        let (lo, hi) = y_bounds(&[[0.0, 10.0], [1.0, 20.0]]);
        assert!((lo - 9.0).abs() < 1e-9);
        assert!((hi - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_y_bounds_flat_line() {
        let (lo, hi) = y_bounds(&[[0.0, 350.0], [1.0, 350.0]]);
        assert!(lo < 350.0 && hi > 350.0);
        assert!((350.0 - lo - (hi - 350.0)).abs() < 1e-9);
    }
}
