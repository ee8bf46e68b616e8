//! Analysis module for channel data
//!
//! This module provides summary tools over buffered samples:
//! - Descriptive statistics (min, max, mean, population standard deviation)

pub mod stats;

pub use stats::ChannelStatistics;
