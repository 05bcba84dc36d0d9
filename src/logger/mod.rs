//! Audit logging: append-only record of monitor state transitions.

pub mod audit;
