//! `vaultkeep sweep` - one-shot pass over the whole vault

use std::path::Path;

use chrono::Local;

use crate::cli::{Cli, OutputFormat};
use vaultkeep_core::error::Result;
use vaultkeep_core::keeper::Keeper;

pub fn run(cli: &Cli, vault: &Path) -> Result<()> {
    let keeper = Keeper::open(vault)?;
    let report = keeper.sweep(Local::now().date_naive())?;

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Human => {
            if !cli.quiet {
                println!(
                    "swept {} notes: {} archived, {} stamped, {} pages mirrored",
                    report.notes, report.archived, report.stamped, report.pages
                );
            }
        }
    }
    Ok(())
}
