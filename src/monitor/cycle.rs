//! One polling cycle: classify pools, resolve problem drives, decide
//! raise/clear.

use crate::alarm::store::AlarmStore;
use crate::collab::{DeviceResolver, IndicatorController, StorageStatusProvider};
use crate::core::errors::Result;
use crate::logger::audit::AuditLog;
use crate::monitor::types::{CycleResult, DriveProblem, Pool, PoolHealth};

/// Runs the per-cycle classification and alarm decision over the pool
/// set discovered at startup.
pub struct PoolMonitor<'a> {
    status: &'a dyn StorageStatusProvider,
    resolver: &'a dyn DeviceResolver,
    indicator: &'a dyn IndicatorController,
    store: &'a AlarmStore,
    audit: &'a AuditLog,
}

impl<'a> PoolMonitor<'a> {
    #[must_use]
    pub const fn new(
        status: &'a dyn StorageStatusProvider,
        resolver: &'a dyn DeviceResolver,
        indicator: &'a dyn IndicatorController,
        store: &'a AlarmStore,
        audit: &'a AuditLog,
    ) -> Self {
        Self {
            status,
            resolver,
            indicator,
            store,
            audit,
        }
    }

    /// Query every monitored pool, aggregate one alarm list across all
    /// of them, then raise or clear the global alarm.
    ///
    /// A failed status query demotes that pool to `Unknown` for this
    /// cycle (fail-open): better a late alarm than a false one from a
    /// transient query failure. Unresolvable drives are excluded from
    /// the indicator list but kept by raw identifier for the audit line.
    pub fn run_cycle(&self, pools: &[String]) -> Result<CycleResult> {
        self.audit
            .append(&format!("poll cycle start: {} pool(s)", pools.len()))?;

        let mut result = CycleResult::default();
        for name in pools {
            let health = match self.status.status(name) {
                Ok(status) => {
                    let health = PoolHealth::parse(&status.state);
                    if health.is_problem() {
                        for drive_id in status.unavailable_drives {
                            let resolved = self.resolver.resolve(&drive_id);
                            result.drives.push(DriveProblem { drive_id, resolved });
                        }
                    }
                    health
                }
                Err(e) => {
                    self.audit.append(&format!(
                        "warning: status query failed for pool {name} ({}); treating as unknown",
                        e.code()
                    ))?;
                    PoolHealth::Unknown
                }
            };
            result.pools.push(Pool {
                name: name.clone(),
                health,
            });
        }

        if result.has_alarm() {
            self.store.raise(&result.alarm_list())?;
            self.audit.append(&alarm_line(&result))?;
        } else if !result.any_degraded() && self.store.is_raised() {
            // Indicators first: if the all-clear command fails the marker
            // stays, and the next cycle retries the clear.
            self.indicator.clear_all()?;
            self.store.clear()?;
            self.audit.append("ALL CLEAR: all pools healthy")?;
        }

        Ok(result)
    }
}

fn alarm_line(result: &CycleResult) -> String {
    let located = result
        .alarm_list()
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(",");
    let unresolved = result.unresolved();
    if unresolved.is_empty() {
        format!("ALARM: unavailable drives, locate set: {located}")
    } else {
        format!(
            "ALARM: unavailable drives, locate set: {located} (unresolved: {})",
            unresolved.join(",")
        )
    }
}
