//! Append-only audit log with RFC 3339 timestamps.
//!
//! One line per monitor event. The file is opened per append rather than
//! held open, so an external log rotation never strands a stale handle.

use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};

use crate::core::errors::{PgdError, Result};

/// Handle on the audit log destination.
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    /// Bind to a log path, creating its parent directory if missing.
    /// Startup fails here when the destination is uncreatable.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PgdError::io(parent, e))?;
        }
        // Touch the file so permission problems surface at startup, not
        // on the first alarm.
        OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .map_err(|e| PgdError::io(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Append one timestamped line.
    pub fn append(&self, message: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| PgdError::io(&self.path, e))?;
        let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        writeln!(file, "{stamp} {message}").map_err(|e| PgdError::io(&self.path, e))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::AuditLog;

    #[test]
    fn open_creates_missing_parent_directory() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("audit.log");
        let log = AuditLog::open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(log.path(), path);
    }

    #[test]
    fn append_is_ordered_and_timestamped() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("audit.log");
        let log = AuditLog::open(&path).unwrap();
        log.append("ALARM: tank degraded").unwrap();
        log.append("ALL CLEAR").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("ALARM: tank degraded"));
        assert!(lines[1].ends_with("ALL CLEAR"));
        // RFC 3339 stamp up front.
        assert!(lines[0].contains('T') && lines[0].contains('Z'));
    }
}
