//! Status bar panel: source location, ingestion counters and the last message.

use egui::{Color32, RichText, Ui};

/// Context needed to render the status bar.
pub struct StatusBarContext<'a> {
    pub source: &'a str,
    pub applied: u64,
    pub rejected: u64,
    pub message: &'a str,
}

/// Render the status bar.
pub fn render_status_bar(ui: &mut Ui, ctx: &StatusBarContext<'_>) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        // === Source ===
        let source_color = if ctx.applied > 0 {
            Color32::GREEN
        } else {
            Color32::GRAY
        };
        ui.colored_label(source_color, "●");
        ui.label(RichText::new(ctx.source).small());

        ui.separator();

        ui.label(RichText::new(format!("Readings: {}", ctx.applied)).small());

        ui.separator();

        let rejected_color = if ctx.rejected > 0 {
            Color32::LIGHT_RED
        } else {
            Color32::GRAY
        };
        ui.colored_label(
            rejected_color,
            RichText::new(format!("Discarded: {}", ctx.rejected)).small(),
        );

        ui.separator();

        // === Last message ===
        ui.label(RichText::new(ctx.message).small().weak());
    });
}
