//! Command-backed pool status provider.
//!
//! Shells out to a `zpool`-compatible tool. The exact report format is
//! the tool's business; this module only extracts the pool state line
//! and the per-device rows marked unavailable.

use std::path::PathBuf;
use std::process::Command;

use super::{PoolStatus, StorageStatusProvider};
use crate::core::errors::{PgdError, Result};

/// Provider that invokes the resolved pool status executable.
#[derive(Debug, Clone)]
pub struct CommandStatusProvider {
    tool: PathBuf,
}

impl CommandStatusProvider {
    #[must_use]
    pub const fn new(tool: PathBuf) -> Self {
        Self { tool }
    }

    fn run(&self, pool: &str, args: &[&str]) -> Result<String> {
        let output = Command::new(&self.tool)
            .args(args)
            .output()
            .map_err(|e| PgdError::StatusQuery {
                pool: pool.to_string(),
                details: format!("{} failed to start: {e}", self.tool.display()),
            })?;
        if !output.status.success() {
            return Err(PgdError::StatusQuery {
                pool: pool.to_string(),
                details: format!("{} exited with {}", self.tool.display(), output.status),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl StorageStatusProvider for CommandStatusProvider {
    fn list_pools(&self) -> Result<Vec<String>> {
        let out = self.run("*", &["list", "-H", "-o", "name"])?;
        Ok(out
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToString::to_string)
            .collect())
    }

    fn status(&self, pool: &str) -> Result<PoolStatus> {
        let out = self.run(pool, &["status", pool])?;
        Ok(parse_status_report(pool, &out))
    }
}

/// Extract the state line and unavailable device rows from a status
/// report. Unparseable reports yield an empty state, which the monitor
/// normalizes to `Unknown` (fail-open).
#[must_use]
pub fn parse_status_report(pool: &str, report: &str) -> PoolStatus {
    let mut status = PoolStatus::default();

    for line in report.lines() {
        let trimmed = line.trim();
        if let Some(state) = trimmed.strip_prefix("state:") {
            status.state = state.trim().to_string();
            continue;
        }

        // Device rows: "<name> <STATE> <read> <write> <cksum>". The row
        // naming the pool itself is skipped; its health comes from the
        // state line above.
        let mut fields = trimmed.split_whitespace();
        let (Some(name), Some(state)) = (fields.next(), fields.next()) else {
            continue;
        };
        if name == pool {
            continue;
        }
        if matches!(state, "UNAVAIL" | "FAULTED" | "REMOVED") {
            status.unavailable_drives.push(name.to_string());
        }
    }

    status
}
