//! Synapsis CLI
//!
//! Permission, entity-name, and config tools for Synapse.

use anyhow::{Context, Result};
use clap::Parser;
use synapsis_cli::cli::Command;
use synapsis_cli::logging::init_logging;
use synapsis_cli::{Cli, ConfigManager, SynapsisConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // `config` commands must work even when the file is missing or broken.
    let config = match cli.command {
        Command::Config { .. } => SynapsisConfig::default(),
        _ => SynapsisConfig::load(cli.config.as_deref()).context("Failed to load configuration")?,
    };

    init_logging(cli.verbose, Some(&config.logging.level));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    synapsis_cli::run(cli, &config, &mut out)?;
    Ok(())
}
