//! Shutdown signal handling.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::core::errors::{PgdError, Result};

/// Flag set by SIGTERM/SIGINT and checked at state boundaries. Signals
/// arriving mid-flash or mid-sleep take effect at the next boundary;
/// the kernel may also kill us outright, which is fine because the next
/// startup recomputes and recommands the full indicator set.
#[derive(Debug, Clone)]
pub struct ShutdownFlag {
    flag: Arc<AtomicBool>,
}

impl ShutdownFlag {
    /// Register handlers for SIGTERM and SIGINT.
    pub fn register() -> Result<Self> {
        let flag = Arc::new(AtomicBool::new(false));
        for signal in [signal_hook::consts::SIGTERM, signal_hook::consts::SIGINT] {
            signal_hook::flag::register(signal, Arc::clone(&flag)).map_err(|e| {
                PgdError::InvalidConfig {
                    details: format!("failed to register signal handler: {e}"),
                }
            })?;
        }
        Ok(Self { flag })
    }

    /// A flag that no signal ever sets, for tests.
    #[must_use]
    pub fn inert() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Set manually (tests and in-process shutdown paths).
    pub fn set(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }
}
