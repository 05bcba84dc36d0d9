//! Attention strobe: flashes the locate indicators a fixed number of
//! times after a poll that observed problem drives.

use std::path::PathBuf;
use std::time::Duration;

use crate::collab::IndicatorController;
use crate::core::errors::Result;
use crate::logger::audit::AuditLog;

/// Drives the indicator through OFF/ON cycles over one alarm list.
///
/// Pure signal driver: never consults the alarm store, never aborts
/// early. A clear that happens while flashing is only observed by the
/// next poll.
pub struct AlarmCycler<'a> {
    indicator: &'a dyn IndicatorController,
    audit: &'a AuditLog,
}

impl<'a> AlarmCycler<'a> {
    #[must_use]
    pub const fn new(indicator: &'a dyn IndicatorController, audit: &'a AuditLog) -> Self {
        Self { indicator, audit }
    }

    /// Run `cycles` OFF/ON iterations. OFF comes first so the sequence
    /// always ends with the indicators ON, leaving the strongest visible
    /// signal during the long sleep that follows.
    pub fn flash(
        &self,
        drives: &[PathBuf],
        cycles: u32,
        on: Duration,
        off: Duration,
    ) -> Result<()> {
        for cycle in 1..=cycles {
            self.indicator.locate_off(drives)?;
            std::thread::sleep(off);
            self.audit
                .append(&format!("flash cycle {cycle}/{cycles}"))?;
            self.indicator.locate(drives)?;
            std::thread::sleep(on);
        }
        Ok(())
    }
}
