//! Toolbar and keyboard shortcuts
//!
//! Both produce [`ViewCommand`]s; the app applies them in order.

use egui::{Key, RichText, Ui};

use crate::types::DisplayMode;
use crate::view::ViewCommand;

/// Buttons shown left to right
const BUTTONS: [ViewCommand; 4] = [
    ViewCommand::Previous,
    ViewCommand::Next,
    ViewCommand::ToggleRange,
    ViewCommand::Reset,
];

/// Context needed to render the toolbar.
pub struct ToolbarContext {
    pub mode: DisplayMode,
}

/// Render the toolbar, returning the commands whose buttons were clicked.
pub fn render_toolbar(ui: &mut Ui, ctx: &ToolbarContext) -> Vec<ViewCommand> {
    let mut commands = Vec::new();

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;

        for command in BUTTONS {
            let label = match command {
                ViewCommand::ToggleRange => format!("Range: {}", ctx.mode.label()),
                _ => command.label().to_string(),
            };
            if ui.button(label).on_hover_text(shortcut_hint(command)).clicked() {
                commands.push(command);
            }
        }

        ui.separator();
        ui.label(RichText::new("← → channel   T range   R reset").small().weak());

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button(ViewCommand::Quit.label()).clicked() {
                commands.push(ViewCommand::Quit);
            }
        });
    });

    commands
}

/// Command bound to a key, if any
pub fn command_for_key(key: Key) -> Option<ViewCommand> {
    match key {
        Key::ArrowRight => Some(ViewCommand::Next),
        Key::ArrowLeft => Some(ViewCommand::Previous),
        Key::R => Some(ViewCommand::Reset),
        Key::T => Some(ViewCommand::ToggleRange),
        Key::Q | Key::Escape => Some(ViewCommand::Quit),
        _ => None,
    }
}

/// Collect commands from this frame's key presses
pub fn keyboard_commands(ctx: &egui::Context) -> Vec<ViewCommand> {
    const KEYS: [Key; 6] = [
        Key::ArrowRight,
        Key::ArrowLeft,
        Key::R,
        Key::T,
        Key::Q,
        Key::Escape,
    ];

    ctx.input(|i| {
        if i.modifiers.any() {
            return Vec::new();
        }
        KEYS.iter()
            .filter(|&&key| i.key_pressed(key))
            .filter_map(|&key| command_for_key(key))
            .collect()
    })
}

fn shortcut_hint(command: ViewCommand) -> &'static str {
    match command {
        ViewCommand::Next => "→",
        ViewCommand::Previous => "←",
        ViewCommand::Reset => "R",
        ViewCommand::ToggleRange => "T",
        ViewCommand::Quit => "Q / Esc",
    }
}
