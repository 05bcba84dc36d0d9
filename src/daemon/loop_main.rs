//! Top-level scheduler: Starting, then Polling / Flashing / Sleeping
//! forever.
//!
//! Startup is the only fatal phase. Once the loop is running, every
//! failure is absorbed as a transient condition and the fixed poll
//! interval is the only retry mechanism. Collaborator calls are not
//! wrapped in timeouts; a hung tool blocks the loop, and recovery is
//! the supervisor's restart.

use crate::alarm::cycler::AlarmCycler;
use crate::alarm::store::AlarmStore;
use crate::collab::indicator::CommandIndicatorController;
use crate::collab::locator::CollaboratorSet;
use crate::collab::resolver::FsDeviceResolver;
use crate::collab::status::CommandStatusProvider;
use crate::collab::{DeviceResolver, IndicatorController, StorageStatusProvider};
use crate::core::config::Config;
use crate::core::errors::{PgdError, Result};
use crate::daemon::signals::ShutdownFlag;
use crate::logger::audit::AuditLog;
use crate::monitor::cycle::PoolMonitor;

/// Everything the Starting phase produces and the loop consumes.
pub struct StartupContext {
    /// Resolved external executables.
    pub collaborators: CollaboratorSet,
    /// Pool set discovered once at startup. Pools created later are
    /// invisible until restart.
    pub pools: Vec<String>,
    /// Audit log, destination verified writable.
    pub audit: AuditLog,
    /// Alarm marker owner.
    pub store: AlarmStore,
}

/// Run all startup preconditions. Any error here is fatal: the caller
/// prints it once and exits non-zero, leaving restart to the supervisor.
pub fn start(config: &Config) -> Result<StartupContext> {
    verify_privilege()?;
    let collaborators = CollaboratorSet::locate(&config.tools)?;
    let audit = AuditLog::open(&config.log_file)?;
    let store = AlarmStore::new(config.marker_file.clone());

    let provider = CommandStatusProvider::new(collaborators.pool_status.clone());
    let pools = provider.list_pools().map_err(|e| PgdError::InvalidConfig {
        details: format!("pool discovery failed: {e}"),
    })?;
    if pools.is_empty() {
        return Err(PgdError::NoPools);
    }

    audit.append(&format!("monitor starting: pools={}", pools.join(",")))?;
    if let Some(state) = store.state()? {
        // A predecessor crashed mid-alarm; the first poll re-confirms.
        audit.append(&format!(
            "alarm marker present from previous run (raised {}, {} drive(s))",
            state.raised_at.to_rfc3339(),
            state.drives.len()
        ))?;
    }
    Ok(StartupContext {
        collaborators,
        pools,
        audit,
        store,
    })
}

/// Start and run forever. Returns only on a shutdown signal.
pub fn run(config: &Config, shutdown: &ShutdownFlag) -> Result<()> {
    let ctx = start(config)?;
    let status = CommandStatusProvider::new(ctx.collaborators.pool_status.clone());
    let resolver = FsDeviceResolver::default();
    let indicator = CommandIndicatorController::new(ctx.collaborators.led_ctl.clone());
    run_loop(config, &ctx, &status, &resolver, &indicator, shutdown)
}

/// The Polling / Flashing / Sleeping loop over injected collaborators.
///
/// The shutdown flag is checked at state boundaries only: a signal
/// arriving mid-flash finishes the sequence first (no early abort).
pub fn run_loop(
    config: &Config,
    ctx: &StartupContext,
    status: &dyn StorageStatusProvider,
    resolver: &dyn DeviceResolver,
    indicator: &dyn IndicatorController,
    shutdown: &ShutdownFlag,
) -> Result<()> {
    let monitor = PoolMonitor::new(status, resolver, indicator, &ctx.store, &ctx.audit);
    let cycler = AlarmCycler::new(indicator, &ctx.audit);

    loop {
        if shutdown.is_set() {
            // Stopping must not be derailed by a log-write failure.
            let _ = ctx.audit.append("shutdown signal received; stopping");
            return Ok(());
        }

        // Polling, then Flashing when the cycle produced an alarm list.
        match monitor.run_cycle(&ctx.pools) {
            Ok(result) if result.has_alarm() => {
                if let Err(e) = cycler.flash(
                    &result.alarm_list(),
                    config.flash_cycles,
                    config.flash_on(),
                    config.flash_off(),
                ) {
                    let _ = ctx
                        .audit
                        .append(&format!("warning: flash sequence failed ({}): {e}", e.code()));
                }
            }
            Ok(_) => {}
            Err(e) => {
                let _ = ctx.audit.append(&format!(
                    "warning: poll cycle failed ({}): {e}; skipping to next interval",
                    e.code()
                ));
            }
        }

        if shutdown.is_set() {
            let _ = ctx.audit.append("shutdown signal received; stopping");
            return Ok(());
        }

        // Sleeping: full interval, whether or not we flashed.
        std::thread::sleep(config.poll_interval());
    }
}

#[cfg(unix)]
fn verify_privilege() -> Result<()> {
    if nix::unistd::Uid::effective().is_root() {
        Ok(())
    } else {
        Err(PgdError::InsufficientPrivilege)
    }
}

#[cfg(not(unix))]
fn verify_privilege() -> Result<()> {
    Err(PgdError::InvalidConfig {
        details: "unsupported platform: indicator control requires unix".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{StartupContext, run_loop};
    use crate::alarm::store::AlarmStore;
    use crate::collab::locator::CollaboratorSet;
    use crate::collab::{
        DeviceResolver, IndicatorController, PoolStatus, StorageStatusProvider,
    };
    use crate::core::config::Config;
    use crate::core::errors::Result;
    use crate::daemon::signals::ShutdownFlag;
    use crate::logger::audit::AuditLog;
    use std::path::PathBuf;

    /// Reports one degraded pool, then requests shutdown so the loop
    /// exits after a single cycle.
    struct OneShotStatus {
        shutdown: ShutdownFlag,
    }

    impl StorageStatusProvider for OneShotStatus {
        fn list_pools(&self) -> Result<Vec<String>> {
            Ok(vec!["tank".to_string()])
        }
        fn status(&self, _pool: &str) -> Result<PoolStatus> {
            self.shutdown.set();
            Ok(PoolStatus {
                state: "DEGRADED".to_string(),
                unavailable_drives: vec!["sda".to_string()],
            })
        }
    }

    struct RawResolver;
    impl DeviceResolver for RawResolver {
        fn resolve(&self, drive_id: &str) -> Option<PathBuf> {
            Some(PathBuf::from(format!("/dev/{drive_id}")))
        }
    }

    struct NullIndicator;
    impl IndicatorController for NullIndicator {
        fn locate(&self, _paths: &[PathBuf]) -> Result<()> {
            Ok(())
        }
        fn locate_off(&self, _paths: &[PathBuf]) -> Result<()> {
            Ok(())
        }
        fn clear_all(&self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn loop_polls_flashes_and_honors_shutdown_at_boundary() {
        let tmp = tempfile::TempDir::new().unwrap();
        let audit = AuditLog::open(&tmp.path().join("audit.log")).unwrap();
        let store = AlarmStore::new(tmp.path().join("alarm.marker"));
        let ctx = StartupContext {
            collaborators: CollaboratorSet {
                pool_status: PathBuf::from("/bin/true"),
                led_ctl: PathBuf::from("/bin/true"),
            },
            pools: vec!["tank".to_string()],
            audit,
            store,
        };
        let config = Config {
            flash_cycles: 2,
            flash_on_secs: 0,
            flash_off_secs: 0,
            ..Config::default()
        };
        let shutdown = ShutdownFlag::inert();
        let status = OneShotStatus {
            shutdown: shutdown.clone(),
        };

        run_loop(&config, &ctx, &status, &RawResolver, &NullIndicator, &shutdown).unwrap();

        assert!(ctx.store.is_raised(), "alarm should persist past shutdown");
        let log = std::fs::read_to_string(ctx.audit.path()).unwrap();
        assert!(log.contains("poll cycle start"));
        assert!(log.contains("ALARM"));
        assert!(log.contains("flash cycle 2/2"));
        assert!(log.contains("shutdown signal received"));
    }

    #[test]
    fn shutdown_exit_survives_audit_write_failure() {
        let tmp = tempfile::TempDir::new().unwrap();
        let log_dir = tmp.path().join("logs");
        let audit = AuditLog::open(&log_dir.join("audit.log")).unwrap();
        // The log destination vanishes after startup; every later
        // append fails, but the stop path must still return cleanly.
        std::fs::remove_dir_all(&log_dir).unwrap();
        let ctx = StartupContext {
            collaborators: CollaboratorSet {
                pool_status: PathBuf::from("/bin/true"),
                led_ctl: PathBuf::from("/bin/true"),
            },
            pools: vec!["tank".to_string()],
            audit,
            store: AlarmStore::new(tmp.path().join("alarm.marker")),
        };
        let config = Config::default();
        let shutdown = ShutdownFlag::inert();
        shutdown.set();
        let status = OneShotStatus {
            shutdown: shutdown.clone(),
        };

        run_loop(&config, &ctx, &status, &RawResolver, &NullIndicator, &shutdown)
            .expect("stop path must not depend on a writable log");
    }
}
