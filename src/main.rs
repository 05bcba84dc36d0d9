//! `poolguardd` entry point.

use clap::Parser as _;

fn main() {
    let cli = poolguard::cli_app::Cli::parse();
    if let Err(e) = poolguard::cli_app::run(&cli) {
        // One human-readable line; the supervisor handles restart.
        println!("poolguardd: {e}");
        std::process::exit(1);
    }
}
