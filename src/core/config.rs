//! Monitor configuration: immutable for the process lifetime.
//!
//! Defaults target a supervised install (`/var/log`, `/var/run`); a TOML
//! file may override any field. There is no runtime reload — the daemon
//! is expected to be restarted by its supervisor after a config change.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::errors::{PgdError, Result};

/// External executables the daemon drives. Names only; they are resolved
/// against `PATH` once during startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ToolsConfig {
    /// Pool status tool (`zpool`-compatible surface).
    pub pool_status: String,
    /// LED control tool.
    pub led_ctl: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            pool_status: "zpool".to_string(),
            led_ctl: "ledctl".to_string(),
        }
    }
}

/// Full daemon configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Seconds to sleep between poll cycles.
    pub poll_interval_secs: u64,
    /// Seconds the indicators stay ON within one flash cycle.
    pub flash_on_secs: u64,
    /// Seconds the indicators stay OFF within one flash cycle.
    pub flash_off_secs: u64,
    /// Flash cycles run after each poll that observed problem drives.
    pub flash_cycles: u32,
    /// Append-only audit log destination.
    pub log_file: PathBuf,
    /// Alarm marker file; its existence means an alarm is active.
    pub marker_file: PathBuf,
    /// External executables.
    pub tools: ToolsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_interval_secs: 300,
            flash_on_secs: 10,
            flash_off_secs: 5,
            flash_cycles: 10,
            log_file: PathBuf::from("/var/log/poolguard/poolguard.log"),
            marker_file: PathBuf::from("/var/run/poolguard.alarm"),
            tools: ToolsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file. Missing fields fall back to
    /// defaults; a missing file is an error (the caller decides whether
    /// to pass a path at all).
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| PgdError::io(path, e))?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the state machine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_secs == 0 {
            return Err(PgdError::InvalidConfig {
                details: "poll_interval_secs must be non-zero".to_string(),
            });
        }
        if self.flash_cycles == 0 {
            return Err(PgdError::InvalidConfig {
                details: "flash_cycles must be non-zero".to_string(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    #[must_use]
    pub const fn flash_on(&self) -> Duration {
        Duration::from_secs(self.flash_on_secs)
    }

    #[must_use]
    pub const fn flash_off(&self) -> Duration {
        Duration::from_secs(self.flash_off_secs)
    }
}
