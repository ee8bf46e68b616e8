//! Core data types for envdash-rs
//!
//! This module contains the fundamental data structures used throughout
//! the application for representing channels, samples, and display modes.
//!
//! # Main Types
//!
//! - [`Channel`] - The four measured quantities, in fixed ordinal order
//! - [`Sample`] - A single timestamped value, relative to session start
//! - [`Reading`] - One decoded payload: a value for every channel
//! - [`DisplayMode`] - Short-range (recent ring) or long-range (history) view
//!
//! # Channel Order
//!
//! Channels are always ordered Temperature, Light, Gas, Humidity. That order
//! matches the field order of the ingestion payload and the ordinal shown in
//! the dashboard title.

use serde::{Deserialize, Serialize};

/// Number of channels carried by every reading
pub const CHANNEL_COUNT: usize = 4;

/// One of the four measured quantities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Channel {
    /// Ambient temperature in °C
    #[default]
    Temperature,
    /// Light level (raw ADC counts)
    Light,
    /// Gas sensor level (raw ADC counts)
    Gas,
    /// Relative humidity in %
    Humidity,
}

impl Channel {
    /// All channels in ordinal order
    pub const ALL: [Channel; CHANNEL_COUNT] = [
        Channel::Temperature,
        Channel::Light,
        Channel::Gas,
        Channel::Humidity,
    ];

    /// Zero-based position of this channel
    pub fn index(&self) -> usize {
        match self {
            Channel::Temperature => 0,
            Channel::Light => 1,
            Channel::Gas => 2,
            Channel::Humidity => 3,
        }
    }

    /// Channel at a position, wrapping modulo [`CHANNEL_COUNT`]
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % CHANNEL_COUNT]
    }

    /// The following channel, wrapping from Humidity back to Temperature
    pub fn next(&self) -> Channel {
        Self::from_index(self.index() + 1)
    }

    /// The preceding channel, wrapping from Temperature back to Humidity
    pub fn prev(&self) -> Channel {
        Self::from_index(self.index() + CHANNEL_COUNT - 1)
    }

    /// Get display name for this channel
    pub fn display_name(&self) -> &'static str {
        match self {
            Channel::Temperature => "Temperature",
            Channel::Light => "Light",
            Channel::Gas => "Gas",
            Channel::Humidity => "Humidity",
        }
    }

    /// Unit label for display
    pub fn unit(&self) -> &'static str {
        match self {
            Channel::Temperature => "°C",
            Channel::Light => "lx",
            Channel::Gas => "ppm",
            Channel::Humidity => "%",
        }
    }

    /// Plot color (RGBA)
    pub fn color(&self) -> [u8; 4] {
        match self {
            Channel::Temperature => [230, 85, 60, 255],
            Channel::Light => [230, 180, 40, 255],
            Channel::Gas => [120, 120, 220, 255],
            Channel::Humidity => [40, 160, 200, 255],
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A single data point: time in seconds since session start, and a value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Seconds since the session started
    pub timestamp: f64,
    /// The measured value
    pub value: f64,
}

impl Sample {
    pub fn new(timestamp: f64, value: f64) -> Self {
        Self { timestamp, value }
    }

    /// As a plot point `[time, value]`
    pub fn as_point(&self) -> [f64; 2] {
        [self.timestamp, self.value]
    }
}

/// One decoded sensor payload, one value per channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub temperature: f64,
    pub light: f64,
    pub gas: f64,
    pub humidity: f64,
}

impl Reading {
    pub fn new(temperature: f64, light: f64, gas: f64, humidity: f64) -> Self {
        Self {
            temperature,
            light,
            gas,
            humidity,
        }
    }

    /// Value carried for a channel
    pub fn value(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Temperature => self.temperature,
            Channel::Light => self.light,
            Channel::Gas => self.gas,
            Channel::Humidity => self.humidity,
        }
    }

    /// Iterate `(channel, value)` pairs in channel order
    pub fn iter(&self) -> impl Iterator<Item = (Channel, f64)> + '_ {
        Channel::ALL.iter().map(move |&c| (c, self.value(c)))
    }

    /// Render as the 4-field comma-separated payload format
    pub fn to_payload(&self) -> String {
        format!(
            "{},{},{},{}",
            self.temperature, self.light, self.gas, self.humidity
        )
    }
}

/// Which time span is projected for viewing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DisplayMode {
    /// The last few seconds, drawn from the recent ring buffer
    #[default]
    ShortRange,
    /// The full retention horizon, drawn from the history buffer
    LongRange,
}

impl DisplayMode {
    /// The other mode
    pub fn toggled(&self) -> DisplayMode {
        match self {
            DisplayMode::ShortRange => DisplayMode::LongRange,
            DisplayMode::LongRange => DisplayMode::ShortRange,
        }
    }

    /// Short label for buttons and titles
    pub fn label(&self) -> &'static str {
        match self {
            DisplayMode::ShortRange => "30s",
            DisplayMode::LongRange => "1h",
        }
    }
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayMode::ShortRange => write!(f, "Short range"),
            DisplayMode::LongRange => write!(f, "Long range"),
        }
    }
}
