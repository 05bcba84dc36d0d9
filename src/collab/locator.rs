//! One-shot collaborator discovery during startup.
//!
//! Resolves each configured tool name against `PATH` exactly once and
//! hands the results around as an explicit struct, so nothing downstream
//! consults the environment again.

use std::path::{Path, PathBuf};

use crate::core::config::ToolsConfig;
use crate::core::errors::{PgdError, Result};

/// Absolute paths of the external executables, resolved at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollaboratorSet {
    /// Pool status tool.
    pub pool_status: PathBuf,
    /// LED control tool.
    pub led_ctl: PathBuf,
}

impl CollaboratorSet {
    /// Resolve every configured tool, failing on the first one missing.
    pub fn locate(tools: &ToolsConfig) -> Result<Self> {
        Ok(Self {
            pool_status: find_on_path(&tools.pool_status)?,
            led_ctl: find_on_path(&tools.led_ctl)?,
        })
    }
}

/// Search `PATH` for an executable name. Names given with a directory
/// component bypass the search but still must be executable.
pub fn find_on_path(name: &str) -> Result<PathBuf> {
    let candidate = Path::new(name);
    if candidate.components().count() > 1 {
        if is_executable(candidate) {
            return Ok(candidate.to_path_buf());
        }
        return Err(PgdError::MissingCollaborator {
            name: name.to_string(),
        });
    }

    let search_path = std::env::var_os("PATH").unwrap_or_default();
    for dir in std::env::split_paths(&search_path) {
        let full = dir.join(name);
        if is_executable(&full) {
            return Ok(full);
        }
    }
    Err(PgdError::MissingCollaborator {
        name: name.to_string(),
    })
}

/// A candidate only counts if we could actually exec it; a plain file
/// on PATH without the execute bit would otherwise pass startup and
/// first fail mid-poll.
#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
