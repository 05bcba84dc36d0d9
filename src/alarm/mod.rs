//! Alarm lifecycle: persisted state marker and the attention strobe.

pub mod cycler;
pub mod store;
