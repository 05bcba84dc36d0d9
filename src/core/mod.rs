//! Core types shared across the daemon: configuration and errors.

pub mod config;
pub mod errors;
