//! View state and user navigation
//!
//! The view is a small finite state over the active channel and the display
//! mode, plus the session start that all sample timestamps are relative to.
//! Every user command requests an immediate redraw; unlike data-driven
//! redraws these are never throttled.

use crate::store::SampleStore;
use crate::types::{Channel, DisplayMode, CHANNEL_COUNT};

/// Discrete user commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewCommand {
    /// Show the next channel, wrapping around
    Next,
    /// Show the previous channel, wrapping around
    Previous,
    /// Clear all buffered data and restart the session clock
    Reset,
    /// Switch between short-range and long-range display
    ToggleRange,
    /// Close the dashboard
    Quit,
}

impl ViewCommand {
    /// Label for toolbar buttons
    pub fn label(&self) -> &'static str {
        match self {
            ViewCommand::Next => "Next ▶",
            ViewCommand::Previous => "◀ Prev",
            ViewCommand::Reset => "Reset",
            ViewCommand::ToggleRange => "Toggle range",
            ViewCommand::Quit => "Quit",
        }
    }
}

/// What the front end should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Redraw immediately
    Redraw,
    /// Tear down the surface and exit
    Quit,
}

/// Which channel and time span are showing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub active_channel: Channel,
    pub display_mode: DisplayMode,
    /// Wall-clock seconds the current session started at
    pub session_start: f64,
}

impl ViewState {
    pub fn new(session_start: f64) -> Self {
        Self {
            active_channel: Channel::default(),
            display_mode: DisplayMode::default(),
            session_start,
        }
    }

    /// Seconds since the session started
    pub fn elapsed(&self, now: f64) -> f64 {
        (now - self.session_start).max(0.0)
    }
}

/// Applies user commands to the view state
#[derive(Debug, Clone)]
pub struct ViewController {
    state: ViewState,
}

impl ViewController {
    pub fn new(session_start: f64) -> Self {
        Self {
            state: ViewState::new(session_start),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn active_channel(&self) -> Channel {
        self.state.active_channel
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.state.display_mode
    }

    pub fn session_start(&self) -> f64 {
        self.state.session_start
    }

    /// Title line, e.g. `Temperature (1/4)`
    pub fn title(&self) -> String {
        let channel = self.state.active_channel;
        format!(
            "{} ({}/{})",
            channel.display_name(),
            channel.index() + 1,
            CHANNEL_COUNT
        )
    }

    /// Apply a command
    ///
    /// `Reset` clears `store` and re-bases the session start to `now`. The
    /// session start never moves backwards, even if the wall clock does.
    pub fn apply(&mut self, command: ViewCommand, store: &mut SampleStore, now: f64) -> Transition {
        match command {
            ViewCommand::Next => {
                self.state.active_channel = self.state.active_channel.next();
            }
            ViewCommand::Previous => {
                self.state.active_channel = self.state.active_channel.prev();
            }
            ViewCommand::ToggleRange => {
                self.state.display_mode = self.state.display_mode.toggled();
            }
            ViewCommand::Reset => {
                store.clear();
                self.state.session_start = self.state.session_start.max(now);
                tracing::info!(session_start = self.state.session_start, "Session reset");
            }
            ViewCommand::Quit => return Transition::Quit,
        }
        tracing::debug!(?command, channel = %self.state.active_channel, mode = %self.state.display_mode, "View updated");
        Transition::Redraw
    }
}
