//! CLI argument parsing for vaultkeep
//!
//! Global flags: --vault, --format, --quiet, --verbose, --log-level,
//! --log-json. Subcommands cover the three entry points: watch, sweep,
//! index.

mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use output::OutputFormat;

/// Vaultkeep - housekeeping for a markdown task vault
#[derive(Parser, Debug)]
#[command(name = "vaultkeep")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Vault root directory (defaults to the current directory)
    #[arg(long, global = true, env = "VAULTKEEP_VAULT")]
    pub vault: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Explicit log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Watch the vault and run the rules on every change
    Watch {
        /// Milliseconds to wait for events to settle before acting
        #[arg(long, default_value_t = 250)]
        debounce_ms: u64,
    },
    /// Run the rules once over every note in the vault
    Sweep,
    /// Rewrite the JSON page-table mirror and exit
    Index,
}
