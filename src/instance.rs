//! Single-instance coordination
//!
//! Only one process consumes the shared source at a time. The first instance
//! creates a lock marker file; any instance started while the marker exists
//! switches to hand-off mode: it writes its input straight into the source
//! (where the active instance will pick it up) and exits without opening a
//! view.
//!
//! The marker is removed when the [`InstanceGuard`] is released or dropped.
//! A crash that skips both leaves a stale marker behind. By default that
//! marker keeps every later start in hand-off mode until it is deleted by
//! hand; setting `lock.reclaim_stale` makes acquisition check whether the
//! recorded process is still alive and take over the marker if it is not.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::config::LockConfig;
use crate::error::{DashError, Result};
use crate::ingest::FileSource;

/// Informational content of the lock marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockMarker {
    /// Process id of the active instance
    pub pid: u32,
    /// When the active instance started
    pub started_at: DateTime<Utc>,
}

impl LockMarker {
    /// Marker describing the current process
    pub fn current() -> Self {
        Self {
            pid: std::process::id(),
            started_at: Utc::now(),
        }
    }

    /// Read a marker file; `None` if it is missing or unreadable
    pub fn read(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }
}

/// Outcome of trying to become the active instance
#[derive(Debug)]
pub enum Acquisition {
    /// This process holds the lock and should run the dashboard
    Acquired(InstanceGuard),
    /// Another instance is active; forward input and exit
    HandOff {
        /// The active instance's marker, if it could be read
        holder: Option<LockMarker>,
    },
}

/// Holds the lock marker for the lifetime of the active instance
#[derive(Debug)]
pub struct InstanceGuard {
    path: PathBuf,
    released: bool,
}

impl InstanceGuard {
    /// Try to become the active instance
    pub fn acquire(config: &LockConfig) -> Result<Acquisition> {
        let path = &config.lock_path;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    DashError::Lock(format!("Failed to create lock directory {:?}: {}", parent, e))
                })?;
            }
        }

        match Self::create_marker(path)? {
            Some(guard) => Ok(Acquisition::Acquired(guard)),
            None => {
                let holder = LockMarker::read(path);
                if config.reclaim_stale {
                    if let Some(marker) = holder.as_ref().filter(|m| !process_is_alive(m.pid)) {
                        tracing::warn!(
                            pid = marker.pid,
                            "Reclaiming lock {:?} left by a process that is no longer running",
                            path
                        );
                        std::fs::remove_file(path).map_err(|e| {
                            DashError::Lock(format!("Failed to remove stale lock {:?}: {}", path, e))
                        })?;
                        if let Some(guard) = Self::create_marker(path)? {
                            return Ok(Acquisition::Acquired(guard));
                        }
                        // Lost the race to another starter
                        return Ok(Acquisition::HandOff {
                            holder: LockMarker::read(path),
                        });
                    }
                }
                tracing::info!(?holder, "Lock {:?} is held by another instance", path);
                Ok(Acquisition::HandOff { holder })
            }
        }
    }

    /// Create the marker exclusively; `None` if it already exists
    fn create_marker(path: &Path) -> Result<Option<Self>> {
        let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(None),
            Err(e) => {
                return Err(DashError::Lock(format!(
                    "Failed to create lock {:?}: {}",
                    path, e
                )))
            }
        };

        // From here on the guard owns the file and removes it on any error
        let guard = Self {
            path: path.to_path_buf(),
            released: false,
        };
        let content = serde_json::to_string(&LockMarker::current())?;
        file.write_all(content.as_bytes())
            .map_err(|e| DashError::Lock(format!("Failed to write lock {:?}: {}", path, e)))?;

        tracing::info!("Acquired instance lock {:?}", path);
        Ok(Some(guard))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the marker, reporting failures
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        remove_marker(&self.path)
    }
}

impl Drop for InstanceGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = remove_marker(&self.path) {
            tracing::error!("{}", e);
        }
    }
}

fn remove_marker(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            tracing::info!("Released instance lock {:?}", path);
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(DashError::Lock(format!(
            "Failed to remove lock {:?}: {}",
            path, e
        ))),
    }
}

fn process_is_alive(pid: u32) -> bool {
    let pid = Pid::from_u32(pid);
    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::Some(&[pid]));
    system.process(pid).is_some()
}

/// Forward input to the active instance through the shared source
///
/// The payload is validated first so a malformed hand-off is reported to the
/// caller instead of being silently dropped by the active instance.
pub fn hand_off(source: &FileSource, payload: Option<&str>) -> Result<()> {
    let Some(payload) = payload else {
        tracing::info!("Another instance is active and no input was given; exiting");
        return Ok(());
    };
    source.publish(payload)?;
    tracing::info!("Handed off {:?} to {}", payload.trim(), source.path().display());
    Ok(())
}
