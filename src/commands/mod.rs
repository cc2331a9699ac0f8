//! Command implementations for vaultkeep

mod index;
mod sweep;
mod watch;

use std::env;
use std::path::PathBuf;

use crate::cli::{Cli, Commands};
use vaultkeep_core::error::Result;

pub fn run(cli: &Cli) -> Result<()> {
    // Determine the vault root
    let vault = cli
        .vault
        .clone()
        .unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    match &cli.command {
        Commands::Watch { debounce_ms } => watch::run(cli, &vault, *debounce_ms),
        Commands::Sweep => sweep::run(cli, &vault),
        Commands::Index => index::run(cli, &vault),
    }
}
