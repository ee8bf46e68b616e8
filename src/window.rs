//! Time-window projection
//!
//! Maps a [`DisplayMode`] to the visible time range and projects buffered
//! samples into it. The projection is a pure function of the mode, the
//! elapsed session time and the two buffers of a channel.
//!
//! - **Short range**: the last `short_range_secs` of the session, taken from
//!   the recent window. Output times are re-based so the window's lower edge
//!   is 0.
//! - **Long range**: `[0, long_range_secs]` since session start, taken from
//!   the history. Output times are unchanged.

use std::collections::VecDeque;

use crate::config::WindowConfig;
use crate::types::{DisplayMode, Sample};

/// Default short-range span in seconds
pub const DEFAULT_SHORT_RANGE_SECS: f64 = 30.0;

/// Default long-range span in seconds
pub const DEFAULT_LONG_RANGE_SECS: f64 = 3600.0;

/// Projects channel buffers into a display window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindowFilter {
    pub short_range_secs: f64,
    pub long_range_secs: f64,
}

impl Default for TimeWindowFilter {
    fn default() -> Self {
        Self {
            short_range_secs: DEFAULT_SHORT_RANGE_SECS,
            long_range_secs: DEFAULT_LONG_RANGE_SECS,
        }
    }
}

impl TimeWindowFilter {
    pub fn from_config(config: &WindowConfig) -> Self {
        Self {
            short_range_secs: config.short_range_secs,
            long_range_secs: config.long_range_secs,
        }
    }

    /// Lower edge of the short-range window in session time
    pub fn short_range_cutoff(&self, elapsed: f64) -> f64 {
        (elapsed - self.short_range_secs).max(0.0)
    }

    /// X-axis span a renderer should show for a mode
    pub fn visible_range(&self, mode: DisplayMode) -> (f64, f64) {
        match mode {
            DisplayMode::ShortRange => (0.0, self.short_range_secs),
            DisplayMode::LongRange => (0.0, self.long_range_secs),
        }
    }

    /// Project samples into `(relative time, value)` points, oldest first
    pub fn project(
        &self,
        mode: DisplayMode,
        elapsed: f64,
        recent: &VecDeque<Sample>,
        history: &VecDeque<Sample>,
    ) -> Vec<[f64; 2]> {
        match mode {
            DisplayMode::ShortRange => {
                let cutoff = self.short_range_cutoff(elapsed);
                recent
                    .iter()
                    .filter(|s| s.timestamp >= cutoff && s.timestamp <= elapsed)
                    // Rounding in `elapsed - span` can push the newest point a
                    // hair past the span
                    .map(|s| [(s.timestamp - cutoff).min(self.short_range_secs), s.value])
                    .collect()
            }
            DisplayMode::LongRange => history
                .iter()
                .filter(|s| s.timestamp >= 0.0 && s.timestamp <= self.long_range_secs)
                .map(Sample::as_point)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(times: &[f64]) -> VecDeque<Sample> {
        times.iter().map(|&t| Sample::new(t, t * 10.0)).collect()
    }

    #[test]
    fn test_short_range_before_window_fills() {
        let filter = TimeWindowFilter::default();
        let recent = samples(&[1.0, 5.0, 12.0]);
        let points = filter.project(DisplayMode::ShortRange, 12.0, &recent, &VecDeque::new());
        // Cutoff is clamped to 0 so times are unchanged
        assert_eq!(points, vec![[1.0, 10.0], [5.0, 50.0], [12.0, 120.0]]);
    }

    #[test]
    fn test_short_range_rebases_to_cutoff() {
        let filter = TimeWindowFilter::default();
        let recent = samples(&[10.0, 25.0, 40.0, 55.0]);
        let points = filter.project(DisplayMode::ShortRange, 55.0, &recent, &VecDeque::new());
        // Cutoff is 25; 10 falls outside
        assert_eq!(points, vec![[0.0, 250.0], [15.0, 400.0], [30.0, 550.0]]);
    }

    #[test]
    fn test_short_range_ignores_history() {
        let filter = TimeWindowFilter::default();
        let history = samples(&[1.0, 2.0]);
        let points = filter.project(DisplayMode::ShortRange, 2.0, &VecDeque::new(), &history);
        assert!(points.is_empty());
    }

    #[test]
    fn test_long_range_uses_history_unmodified() {
        let filter = TimeWindowFilter::default();
        let history = samples(&[0.0, 100.0, 3600.0, 3700.0]);
        let points = filter.project(DisplayMode::LongRange, 3700.0, &VecDeque::new(), &history);
        assert_eq!(points, vec![[0.0, 0.0], [100.0, 1000.0], [3600.0, 36000.0]]);
    }

    #[test]
    fn test_empty_buffers_give_empty_projection() {
        let filter = TimeWindowFilter::default();
        let empty = VecDeque::new();
        assert!(filter.project(DisplayMode::ShortRange, 0.0, &empty, &empty).is_empty());
        assert!(filter.project(DisplayMode::LongRange, 0.0, &empty, &empty).is_empty());
    }

    #[test]
    fn test_visible_range() {
        let filter = TimeWindowFilter::default();
        assert_eq!(filter.visible_range(DisplayMode::ShortRange), (0.0, 30.0));
        assert_eq!(filter.visible_range(DisplayMode::LongRange), (0.0, 3600.0));
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_projection_stays_in_bounds(
            mut times in prop::collection::vec(0.0f64..5000.0, 0..100),
            extra in 0.0f64..100.0
        ) {
            times.sort_by(|a, b| a.partial_cmp(b).unwrap());
            let elapsed = times.last().copied().unwrap_or(0.0) + extra;
            let buffer = samples(&times);
            let filter = TimeWindowFilter::default();

            for [t, _] in filter.project(DisplayMode::ShortRange, elapsed, &buffer, &buffer) {
                prop_assert!((0.0..=30.0).contains(&t));
            }
            for [t, _] in filter.project(DisplayMode::LongRange, elapsed, &buffer, &buffer) {
                prop_assert!(t <= 3600.0);
            }
        }
    }
}
