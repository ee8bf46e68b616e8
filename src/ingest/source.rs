//! External telemetry source
//!
//! The producer writes its latest reading into a plain-text file. Change
//! detection relies on file metadata only: a [`ModificationToken`] built from
//! the modification time and length is compared between polls, so checking
//! for new data never blocks on the file contents.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::{DashError, Result, ResultExt};
use crate::ingest::decode::decode_payload;
use crate::types::Reading;

/// Opaque marker that changes whenever the source is rewritten
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModificationToken {
    modified: SystemTime,
    len: u64,
}

impl ModificationToken {
    pub fn new(modified: SystemTime, len: u64) -> Self {
        Self { modified, len }
    }
}

/// Something the poller can check for changes and read payloads from
#[cfg_attr(test, mockall::automock)]
pub trait TelemetrySource {
    /// Current modification token, `None` if the source does not exist
    fn modification_token(&self) -> Result<Option<ModificationToken>>;

    /// Read the full current payload
    fn read_payload(&self) -> Result<String>;

    /// Human-readable location for status display
    fn describe(&self) -> String;
}

/// File-backed telemetry source
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create an empty source file (and parent directories) if absent
    ///
    /// A missing source just means no data has been produced yet.
    pub fn ensure_exists(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {:?}", parent))?;
            }
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to create source {:?}", self.path))?;
        Ok(())
    }

    /// Replace the source contents with a payload
    pub fn write_payload(&self, payload: &str) -> Result<()> {
        std::fs::write(&self.path, payload)
            .with_context(|| format!("Failed to write source {:?}", self.path))
    }

    /// Validate a reading and write it as the new source contents
    ///
    /// Malformed input is rejected before anything is written, so the
    /// consumer never sees it.
    pub fn publish(&self, payload: &str) -> Result<Reading> {
        let payload = payload.trim();
        let reading = decode_payload(payload)?;
        self.ensure_exists()?;
        self.write_payload(payload)?;
        tracing::debug!(?reading, "Published reading to {:?}", self.path);
        Ok(reading)
    }
}

impl TelemetrySource for FileSource {
    fn modification_token(&self) -> Result<Option<ModificationToken>> {
        match std::fs::metadata(&self.path) {
            Ok(meta) => {
                let modified = meta
                    .modified()
                    .with_context(|| format!("No modification time for {:?}", self.path))?;
                Ok(Some(ModificationToken::new(modified, meta.len())))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DashError::Io(e).with_context(format!("Failed to stat {:?}", self.path))),
        }
    }

    fn read_payload(&self) -> Result<String> {
        std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read source {:?}", self.path))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
