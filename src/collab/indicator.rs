//! Command-backed LED control.

use std::path::PathBuf;
use std::process::Command;

use super::{IndicatorController, all_clear_sentinel};
use crate::core::errors::{PgdError, Result};

/// Controller that invokes the resolved LED tool once per command,
/// passing the full target set as `locate=` / `locate_off=` arguments.
#[derive(Debug, Clone)]
pub struct CommandIndicatorController {
    tool: PathBuf,
}

impl CommandIndicatorController {
    #[must_use]
    pub const fn new(tool: PathBuf) -> Self {
        Self { tool }
    }

    fn run(&self, verb: &str, paths: &[PathBuf]) -> Result<()> {
        if paths.is_empty() {
            return Ok(());
        }
        let joined = paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(",");
        let status = Command::new(&self.tool)
            .arg(format!("{verb}={{{joined}}}"))
            .status()
            .map_err(|e| PgdError::IndicatorCommand {
                details: format!("{} failed to start: {e}", self.tool.display()),
            })?;
        if !status.success() {
            return Err(PgdError::IndicatorCommand {
                details: format!("{} {verb} exited with {status}", self.tool.display()),
            });
        }
        Ok(())
    }
}

impl IndicatorController for CommandIndicatorController {
    fn locate(&self, paths: &[PathBuf]) -> Result<()> {
        self.run("locate", paths)
    }

    fn locate_off(&self, paths: &[PathBuf]) -> Result<()> {
        self.run("locate_off", paths)
    }

    fn clear_all(&self) -> Result<()> {
        // Locating a device that cannot exist forces every other
        // indicator out of the locate state.
        self.run("locate", &[all_clear_sentinel().to_path_buf()])
    }
}
