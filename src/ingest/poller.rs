//! Polling ingestion loop
//!
//! Each tick walks the poller through its states:
//!
//! - **Idle**: compare the source's [`ModificationToken`] with the cursor.
//!   Unchanged means nothing to do.
//! - **Parsing**: read and decode the full payload.
//! - **Applied**: append the reading to every channel with one shared
//!   timestamp, then decide whether a redraw is due.
//! - **Error**: log and discard the payload.
//!
//! In both the Applied and Error cases the token is advanced, so a bad
//! payload is not re-parsed on every tick. A failed read (IO error) does not
//! advance the token and is retried on the next tick.
//!
//! Redraws are throttled independently of ingestion: a burst of writes only
//! triggers one redraw per refresh interval.

use std::time::Duration;

use crate::config::IngestConfig;
use crate::error::{DashError, ParseErrorKind};
use crate::ingest::decode::decode_payload;
use crate::ingest::source::{ModificationToken, TelemetrySource};
use crate::store::SampleStore;
use crate::types::Reading;

/// Process-local ingestion progress
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestionCursor {
    /// Token of the last payload that was read (applied or rejected)
    pub last_seen_token: Option<ModificationToken>,
    /// Wall-clock seconds of the last data-driven redraw
    pub last_redraw: Option<f64>,
}

/// Result of one poll tick
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// The source has not changed since the last tick
    Unchanged,
    /// The source does not exist (yet)
    SourceMissing,
    /// A new reading was appended to the store
    Applied {
        timestamp: f64,
        reading: Reading,
        redraw: bool,
    },
    /// The payload was malformed and discarded
    Rejected { error: String },
    /// The source could not be inspected or read; retried next tick
    SourceError { error: String },
}

impl PollOutcome {
    /// Whether this tick asks for a redraw
    pub fn redraw(&self) -> bool {
        matches!(self, PollOutcome::Applied { redraw: true, .. })
    }
}

/// Detects source changes and feeds decoded readings into a [`SampleStore`]
#[derive(Debug, Clone)]
pub struct IngestionPoller {
    cursor: IngestionCursor,
    refresh_interval_secs: f64,
    applied: u64,
    rejected: u64,
}

impl IngestionPoller {
    pub fn new(refresh_interval: Duration) -> Self {
        Self {
            cursor: IngestionCursor::default(),
            refresh_interval_secs: refresh_interval.as_secs_f64(),
            applied: 0,
            rejected: 0,
        }
    }

    pub fn from_config(config: &IngestConfig) -> Self {
        Self::new(config.refresh_interval())
    }

    pub fn cursor(&self) -> &IngestionCursor {
        &self.cursor
    }

    /// Number of readings appended so far
    pub fn applied_count(&self) -> u64 {
        self.applied
    }

    /// Number of payloads discarded as malformed
    pub fn rejected_count(&self) -> u64 {
        self.rejected
    }

    /// Run one poll tick
    ///
    /// Samples are stamped with `elapsed`, the session-relative time the
    /// caller has already clamped to zero or more. `now` is wall-clock seconds
    /// and only drives the redraw throttle.
    pub fn tick<S: TelemetrySource + ?Sized>(
        &mut self,
        source: &S,
        store: &mut SampleStore,
        elapsed: f64,
        now: f64,
    ) -> PollOutcome {
        let token = match source.modification_token() {
            Ok(Some(token)) => token,
            Ok(None) => return PollOutcome::SourceMissing,
            Err(e) => {
                tracing::warn!("Failed to check source {}: {}", source.describe(), e);
                return PollOutcome::SourceError {
                    error: e.to_string(),
                };
            }
        };

        if self.cursor.last_seen_token == Some(token) {
            return PollOutcome::Unchanged;
        }

        let payload = match source.read_payload() {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!("Failed to read source {}: {}", source.describe(), e);
                return PollOutcome::SourceError {
                    error: e.to_string(),
                };
            }
        };

        // Advance even on failure so the same bad payload is not re-parsed
        self.cursor.last_seen_token = Some(token);

        match decode_payload(&payload) {
            Ok(reading) => {
                let timestamp = elapsed;
                store.append_reading(timestamp, &reading);
                self.applied += 1;
                let redraw = self.take_redraw(now);
                tracing::debug!(timestamp, ?reading, redraw, "Applied reading");
                PollOutcome::Applied {
                    timestamp,
                    reading,
                    redraw,
                }
            }
            Err(e) => {
                self.rejected += 1;
                if matches!(e, DashError::Parse { kind: ParseErrorKind::Empty, .. }) {
                    tracing::debug!("Skipping empty payload");
                } else {
                    tracing::warn!("Discarding payload: {}", e);
                }
                PollOutcome::Rejected {
                    error: e.to_string(),
                }
            }
        }
    }

    /// Check the refresh throttle, recording the redraw if one is due
    fn take_redraw(&mut self, now: f64) -> bool {
        let due = match self.cursor.last_redraw {
            Some(last) => now - last >= self.refresh_interval_secs,
            None => true,
        };
        if due {
            self.cursor.last_redraw = Some(now);
        }
        due
    }
}
