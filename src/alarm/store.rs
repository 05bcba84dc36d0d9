//! Persisted alarm state: a single marker file.
//!
//! The marker's existence is the sole source of truth for "alarm
//! active"; no in-memory flag shadows it, so a restarted daemon
//! observes the same state the previous instance left behind. Content
//! is the comma-joined drive list; the raise time is the file's
//! modification time.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::core::errors::{PgdError, Result};

/// The one entity whose lifecycle spans poll cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmState {
    /// Resolved drive paths the alarm was last raised with.
    pub drives: Vec<PathBuf>,
    /// When the marker was last (re)written.
    pub raised_at: DateTime<Utc>,
}

/// Owner of the alarm marker file.
#[derive(Debug, Clone)]
pub struct AlarmStore {
    marker: PathBuf,
}

impl AlarmStore {
    #[must_use]
    pub const fn new(marker: PathBuf) -> Self {
        Self { marker }
    }

    /// Write (or overwrite) the marker. Every problem cycle re-raises;
    /// there is no distinction between a new alarm and an update.
    pub fn raise(&self, drives: &[PathBuf]) -> Result<()> {
        if let Some(parent) = self.marker.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PgdError::io(parent, e))?;
        }
        let content = drives
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(",");
        std::fs::write(&self.marker, content).map_err(|e| PgdError::io(&self.marker, e))
    }

    /// Remove the marker. Removing an absent marker is a no-op.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.marker) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PgdError::io(&self.marker, e)),
        }
    }

    /// Whether an alarm is currently active.
    #[must_use]
    pub fn is_raised(&self) -> bool {
        self.marker.exists()
    }

    /// Read back the persisted state, if any. A fresh process calls this
    /// once at startup to learn what a crashed predecessor left behind.
    pub fn state(&self) -> Result<Option<AlarmState>> {
        let content = match std::fs::read_to_string(&self.marker) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PgdError::io(&self.marker, e)),
        };
        let meta = std::fs::metadata(&self.marker).map_err(|e| PgdError::io(&self.marker, e))?;
        let modified = meta.modified().map_err(|e| PgdError::io(&self.marker, e))?;
        let drives = content
            .trim()
            .split(',')
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .collect();
        Ok(Some(AlarmState {
            drives,
            raised_at: DateTime::<Utc>::from(modified),
        }))
    }

    #[must_use]
    pub fn marker_path(&self) -> &Path {
        &self.marker
    }
}
