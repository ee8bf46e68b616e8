//! Dual-resolution sample storage
//!
//! Every channel keeps two independent sequences of [`Sample`]s:
//!
//! - **Recent window**: a bounded FIFO of the last `N` samples, used for the
//!   short-range view. When full, the oldest sample is evicted.
//! - **History**: an insertion-ordered log pruned by age. After every append,
//!   samples older than `newest - retention` are dropped. Used for the
//!   long-range view and for statistics.
//!
//! Both sequences receive every appended sample, so the recent window is
//! always the newest `N` entries of the history (while `N` samples fit inside
//! the retention horizon).

use std::collections::VecDeque;

use crate::config::BufferConfig;
use crate::types::{Channel, DisplayMode, Reading, Sample, CHANNEL_COUNT};
use crate::window::TimeWindowFilter;

/// Default capacity of the recent window per channel
pub const DEFAULT_RECENT_CAPACITY: usize = 100;

/// Default history retention horizon in seconds
pub const DEFAULT_RETENTION_SECS: f64 = 3600.0;

/// Recent ring and age-pruned history for one channel
#[derive(Debug, Clone)]
pub struct ChannelBuffer {
    recent: VecDeque<Sample>,
    history: VecDeque<Sample>,
    capacity: usize,
    retention_secs: f64,
}

impl ChannelBuffer {
    pub fn new(capacity: usize, retention_secs: f64) -> Self {
        let capacity = capacity.max(1);
        Self {
            recent: VecDeque::with_capacity(capacity),
            history: VecDeque::new(),
            capacity,
            retention_secs,
        }
    }

    /// Append a sample to both sequences
    pub fn push(&mut self, sample: Sample) {
        if self.recent.len() >= self.capacity {
            self.recent.pop_front();
        }
        self.recent.push_back(sample);

        self.history.push_back(sample);
        self.prune(sample.timestamp);
    }

    fn prune(&mut self, newest: f64) {
        let threshold = newest - self.retention_secs;
        while let Some(front) = self.history.front() {
            if front.timestamp < threshold {
                self.history.pop_front();
            } else {
                break;
            }
        }
    }

    /// The recent window, oldest first
    pub fn recent(&self) -> &VecDeque<Sample> {
        &self.recent
    }

    /// The retained history, oldest first
    pub fn history(&self) -> &VecDeque<Sample> {
        &self.history
    }

    /// Get the last sample
    pub fn latest(&self) -> Option<Sample> {
        self.recent.back().copied()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.recent.clear();
        self.history.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty() && self.recent.is_empty()
    }
}

/// Per-channel buffers for all four channels
#[derive(Debug, Clone)]
pub struct SampleStore {
    channels: [ChannelBuffer; CHANNEL_COUNT],
}

impl Default for SampleStore {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_CAPACITY, DEFAULT_RETENTION_SECS)
    }
}

impl SampleStore {
    /// Create a store with the given recent capacity and retention horizon
    pub fn new(recent_capacity: usize, retention_secs: f64) -> Self {
        Self {
            channels: std::array::from_fn(|_| ChannelBuffer::new(recent_capacity, retention_secs)),
        }
    }

    /// Create a store from buffer configuration
    pub fn from_config(config: &BufferConfig) -> Self {
        Self::new(config.recent_capacity, config.retention_secs)
    }

    /// Append one sample to a channel
    pub fn append(&mut self, channel: Channel, timestamp: f64, value: f64) {
        self.channels[channel.index()].push(Sample::new(timestamp, value));
    }

    /// Append every channel of a reading with one shared timestamp
    pub fn append_reading(&mut self, timestamp: f64, reading: &Reading) {
        for (channel, value) in reading.iter() {
            self.append(channel, timestamp, value);
        }
    }

    /// Get the last sample of a channel
    pub fn latest(&self, channel: Channel) -> Option<Sample> {
        self.channels[channel.index()].latest()
    }

    /// Buffers of a channel
    pub fn channel(&self, channel: Channel) -> &ChannelBuffer {
        &self.channels[channel.index()]
    }

    pub fn recent(&self, channel: Channel) -> &VecDeque<Sample> {
        self.channel(channel).recent()
    }

    pub fn history(&self, channel: Channel) -> &VecDeque<Sample> {
        self.channel(channel).history()
    }

    /// Number of samples in a channel's history
    pub fn len(&self, channel: Channel) -> usize {
        self.history(channel).len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.iter().all(ChannelBuffer::is_empty)
    }

    /// Project a channel into the visible window for a display mode
    pub fn windowed(
        &self,
        channel: Channel,
        filter: &TimeWindowFilter,
        mode: DisplayMode,
        elapsed: f64,
    ) -> Vec<[f64; 2]> {
        let buffer = self.channel(channel);
        filter.project(mode, elapsed, buffer.recent(), buffer.history())
    }

    /// Empty every buffer of every channel
    pub fn clear(&mut self) {
        for buffer in &mut self.channels {
            buffer.clear();
        }
    }
}
