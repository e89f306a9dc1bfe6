//! Command-line argument definitions.

use clap::{Args, Parser, Subcommand};

use crate::config::{CONFIG_ENV, OutputFormat};

/// Synapsis: permission, entity-name, and config tools for Synapse
#[derive(Parser, Debug)]
#[command(name = "synapsis", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = CONFIG_ENV)]
    pub config: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output format (overrides the config file)
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Inspect and compare permissions
    Permission {
        /// Permission action
        #[command(subcommand)]
        action: PermissionAction,
    },
    /// Entity name helpers
    Name {
        /// Name action
        #[command(subcommand)]
        action: NameAction,
    },
    /// Check entity IDs
    Id {
        /// Values to check
        #[arg(required = true)]
        values: Vec<String>,
    },
    /// Resolve platform object types
    Type {
        /// Type action
        #[command(subcommand)]
        action: TypeAction,
    },
    /// Manage the configuration file
    Config {
        /// Config action
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Which catalog to list.
#[derive(Args, Debug, Default, Clone, Copy)]
#[group(multiple = false)]
pub struct CatalogFilter {
    /// Only entity permissions
    #[arg(long)]
    pub entity: bool,
    /// Only team permissions
    #[arg(long)]
    pub team: bool,
}

/// `permission` subcommands.
#[derive(Subcommand, Debug)]
pub enum PermissionAction {
    /// List catalog permissions
    List {
        /// Catalog selection
        #[command(flatten)]
        filter: CatalogFilter,
    },
    /// Resolve a code or access types to a catalog permission
    Get {
        /// A permission code, or access types when `--access-types` is set
        #[arg(required = true)]
        values: Vec<String>,
        /// Treat the values as access types
        #[arg(short, long)]
        access_types: bool,
    },
    /// Find the permission matching a code and/or access types
    Find {
        /// Permission code
        #[arg(long)]
        code: Option<String>,
        /// Access types, comma separated
        #[arg(long, value_delimiter = ',')]
        access_types: Option<Vec<String>>,
    },
    /// Compare two permissions by privilege
    Compare {
        /// Left-hand permission code
        left: String,
        /// Right-hand permission code
        right: String,
    },
}

/// `name` subcommands.
#[derive(Subcommand, Debug)]
pub enum NameAction {
    /// Make a name valid for an entity or file
    Sanitize {
        /// Name to sanitize
        name: String,
        /// Replacement for disallowed characters (may be empty)
        #[arg(short, long)]
        replace: Option<String>,
    },
}

/// `type` subcommands.
#[derive(Subcommand, Debug)]
pub enum TypeAction {
    /// List known concrete types
    List,
    /// Resolve a concrete type code
    Resolve {
        /// Type code, e.g. `org.sagebionetworks.repo.model.FileEntity`
        code: String,
    },
}

/// `config` subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the config file path
    Path,
    /// Print the effective configuration
    Show,
    /// Print one value by dotted key, e.g. `names.replace_char`
    Get {
        /// Dotted key
        key: String,
    },
    /// Set one value by dotted key in the config file
    Set {
        /// Dotted key
        key: String,
        /// New value
        value: String,
    },
    /// Write a default config file
    Init {
        /// Where to write (defaults to the resolved config path)
        #[arg(long)]
        file: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
