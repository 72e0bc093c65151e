//! Tunehound - finds the canonical release/track behind noisy audio tags.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use tunehound::cli;

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("tunehound=info".parse().unwrap()))
        .init();

    cli::run_command(&args)
}
