//! Pool and drive data model for one polling cycle.

#![allow(missing_docs)]

use std::path::PathBuf;

/// Health state reported by the pool status tool, normalized
/// case-insensitively. Anything unrecognized maps to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolHealth {
    Online,
    Offline,
    Degraded,
    Unavailable,
    Unknown,
}

impl PoolHealth {
    /// Normalize a raw state string from the status tool.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "ONLINE" => Self::Online,
            "OFFLINE" => Self::Offline,
            "DEGRADED" => Self::Degraded,
            "UNAVAIL" | "UNAVAILABLE" => Self::Unavailable,
            _ => Self::Unknown,
        }
    }

    /// Whether this state contributes to the alarm. `Unknown` is treated
    /// as healthy (fail-open) so a transient query failure never raises
    /// a false alarm.
    #[must_use]
    pub const fn is_problem(self) -> bool {
        matches!(self, Self::Degraded | Self::Unavailable)
    }
}

/// One monitored pool as observed in the current cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    pub name: String,
    pub health: PoolHealth,
}

/// A drive the status tool reported unavailable, with its resolved
/// addressable path if the resolution chain found one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveProblem {
    pub drive_id: String,
    pub resolved: Option<PathBuf>,
}

/// Outcome of one polling cycle across all monitored pools: every pool
/// as classified this cycle, plus every problem drive the problem pools
/// reported, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleResult {
    pub pools: Vec<Pool>,
    pub drives: Vec<DriveProblem>,
}

impl CycleResult {
    /// Resolved paths to hand to the indicator, in discovery order.
    /// Duplicates are not removed; the indicator protocol tolerates
    /// them and order keeps the audit log readable.
    #[must_use]
    pub fn alarm_list(&self) -> Vec<PathBuf> {
        self.drives
            .iter()
            .filter_map(|drive| drive.resolved.clone())
            .collect()
    }

    /// Raw identifiers of drives the resolver could not map. They
    /// cannot be handed to the indicator but are still named in the
    /// audit log.
    #[must_use]
    pub fn unresolved(&self) -> Vec<&str> {
        self.drives
            .iter()
            .filter(|drive| drive.resolved.is_none())
            .map(|drive| drive.drive_id.as_str())
            .collect()
    }

    /// Whether any pool was classified into a problem state.
    #[must_use]
    pub fn any_degraded(&self) -> bool {
        self.pools.iter().any(|pool| pool.health.is_problem())
    }

    /// Whether this cycle should trigger or re-affirm an alarm.
    #[must_use]
    pub fn has_alarm(&self) -> bool {
        self.drives.iter().any(|drive| drive.resolved.is_some())
    }
}
