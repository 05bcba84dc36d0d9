//! Daemon subsystem: startup preconditions, the scheduling loop, and
//! signal handling.

pub mod loop_main;
pub mod signals;
