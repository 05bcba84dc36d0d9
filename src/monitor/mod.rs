//! Pool monitoring: per-cycle classification and alarm decisions.

pub mod cycle;
pub mod types;
