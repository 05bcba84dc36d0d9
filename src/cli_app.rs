//! Top-level CLI definition and dispatch.

use std::path::PathBuf;

use clap::Parser;

use crate::core::config::Config;
use crate::core::errors::Result;
use crate::daemon::signals::ShutdownFlag;

/// poolguard — watches storage-pool health and drives locate LEDs when
/// pools degrade. Runs in the foreground under a supervisor; takes no
/// operational arguments.
#[derive(Parser)]
#[command(name = "poolguardd", version, about)]
pub struct Cli {
    /// TOML config file overriding built-in defaults.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Load configuration and run the monitor loop until signalled.
pub fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let shutdown = ShutdownFlag::register()?;
    crate::daemon::loop_main::run(&config, &shutdown)
}
