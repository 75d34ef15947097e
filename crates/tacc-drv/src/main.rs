//! Tacc-drv CLI: parses flags, initialises logging, resolves configuration,
//! and fans out the lexer/parser pass over one fixture directory.

use clap::Parser as _;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tacc_drv::config::{CliArgs, Config};

fn main() -> anyhow::Result<()> {
    let cli = CliArgs::parse();
    init_logging();

    let config = Config::resolve(cli)?;
    tacc_drv::run(&config)?;
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init()
        .ok();
}
