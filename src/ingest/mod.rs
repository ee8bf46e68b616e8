//! Ingestion of readings from the external sensor producer
//!
//! The producer and this process never talk directly. The producer rewrites
//! a small text file; this side polls the file's metadata on every tick and
//! only reads it when the [`ModificationToken`] changed.
//!
//! - [`decode`] - payload format and decoding rules
//! - [`source`] - the [`TelemetrySource`] abstraction and its file backend
//! - [`poller`] - the polling state machine and redraw throttle

pub mod decode;
pub mod poller;
pub mod source;

pub use decode::{decode_payload, LEGACY_HUMIDITY_FALLBACK};
pub use poller::{IngestionCursor, IngestionPoller, PollOutcome};
pub use source::{FileSource, ModificationToken, TelemetrySource};
