//! poolguard: a supervised daemon that monitors redundant storage pools
//! and drives per-drive locate LEDs when drives become unavailable.
//!
//! One process per host, single thread of control. Each poll cycle
//! queries every pool, aggregates unavailable drives into one alarm
//! list, persists the alarm as a marker file, flashes the indicators to
//! attract attention, then sleeps until the next cycle.

pub mod alarm;
pub mod cli_app;
pub mod collab;
pub mod core;
pub mod daemon;
pub mod logger;
pub mod monitor;
