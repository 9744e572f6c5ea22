//! Sieve CLI binary.

use std::process;

use clap::Parser;
use sieve::cli::{args::*, commands::*};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = SieveArgs::parse();

    // RUST_LOG takes precedence over -v/-q.
    let default_level = match args.verbosity() {
        0 => "error",
        1 => "warn",
        2 => "info",
        3 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sieve={default_level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
