//! Descriptive statistics over a channel's retained history
//!
//! Statistics always cover the full history buffer, not the visible window,
//! so the summary does not change when the display mode is toggled.
//!
//! Standard deviation uses the population convention (divide by `N`).

use crate::types::Sample;

/// Summary of a channel's history
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelStatistics {
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Mean value
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Number of samples
    pub count: usize,
}

impl ChannelStatistics {
    /// Summarize a sequence of samples, `None` when it is empty
    pub fn summarize<'a, I>(samples: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Sample>,
    {
        let values: Vec<f64> = samples.into_iter().map(|s| s.value).collect();
        Self::from_values(&values)
    }

    /// Summarize a slice of values, `None` when it is empty
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let count = values.len();

        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let sum: f64 = values.iter().sum();
        let mean = sum / count as f64;

        let variance: f64 = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;
        let std_dev = variance.sqrt();

        Some(Self {
            min,
            max,
            mean,
            std_dev,
            count,
        })
    }
}
