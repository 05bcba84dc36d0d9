//! External collaborators behind narrow trait seams: pool status, drive
//! resolution, LED control, plus the startup locator that finds their
//! executables.

pub mod indicator;
pub mod locator;
pub mod resolver;
pub mod status;

use std::path::{Path, PathBuf};

use crate::core::errors::Result;

/// Health and unavailable-drive report for one pool, as returned by the
/// status tool before any normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolStatus {
    /// Raw state string (`ONLINE`, `DEGRADED`, ...).
    pub state: String,
    /// Raw identifiers of drives currently unavailable, in report order.
    pub unavailable_drives: Vec<String>,
}

/// Query surface over the external pool status tool.
pub trait StorageStatusProvider {
    /// Names of all pools visible to the tool.
    fn list_pools(&self) -> Result<Vec<String>>;
    /// Health and unavailable drives for one pool.
    fn status(&self, pool: &str) -> Result<PoolStatus>;
}

/// Maps a raw drive identifier to a stable addressable path.
pub trait DeviceResolver {
    /// First path that resolves in the preference order
    /// by-id > by-uuid > by-path > raw device name, or `None`.
    fn resolve(&self, drive_id: &str) -> Option<PathBuf>;
}

/// Drives the physical locate LEDs.
pub trait IndicatorController {
    /// Turn the locate indicator ON for every path in the set.
    fn locate(&self, paths: &[PathBuf]) -> Result<()>;
    /// Turn the locate indicator OFF for every path in the set.
    fn locate_off(&self, paths: &[PathBuf]) -> Result<()>;
    /// Force every indicator to its all-clear state.
    fn clear_all(&self) -> Result<()>;
}

/// Sentinel handed to the LED tool to force a global off: pointing the
/// locate set at a device that cannot exist clears every indicator.
pub const ALL_CLEAR_SENTINEL: &str = "/dev/null-enclosure-none";

/// Sentinel as a path, for trait implementations and tests.
#[must_use]
pub fn all_clear_sentinel() -> &'static Path {
    Path::new(ALL_CLEAR_SENTINEL)
}
