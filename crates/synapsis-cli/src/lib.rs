//! # synapsis-cli
//!
//! Command-line tools over the Synapsis libraries:
//! - `permission list|get|find|compare`
//! - `name sanitize`
//! - `id`
//! - `type list|resolve`
//! - `config path|show|get|set|init`

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;
pub mod error;
pub mod logging;

use std::io::Write;

use log::debug;

pub use cli::Cli;
pub use config::{ConfigManager, OutputFormat, SynapsisConfig};
pub use error::{Error, Result};

use cli::Command;

/// Runs a parsed command against `config`, writing results to `out`.
pub fn run<W: Write>(cli: Cli, config: &SynapsisConfig, out: &mut W) -> Result<()> {
    let format = cli.format.unwrap_or(config.output.format);
    debug!("Running {:?} with {format:?} output", cli.command);

    match cli.command {
        Command::Permission { action } => commands::handle_permission_command(out, format, action),
        Command::Name { action } => commands::handle_name_command(out, format, config, action),
        Command::Id { values } => commands::cmd_id_check(out, format, &values),
        Command::Type { action } => commands::handle_type_command(out, format, action),
        Command::Config { action } => {
            config_handlers::handle_config_command(out, cli.config.as_deref(), action)
        }
    }
}
