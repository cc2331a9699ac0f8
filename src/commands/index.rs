//! `vaultkeep index` - rewrite the JSON page-table mirror once

use std::path::Path;

use crate::cli::{Cli, OutputFormat};
use vaultkeep_core::error::Result;
use vaultkeep_core::keeper::Keeper;

pub fn run(cli: &Cli, vault: &Path) -> Result<()> {
    let keeper = Keeper::open(vault)?;
    let pages = keeper.refresh_mirror()?;

    match cli.format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "pages": pages,
                "output": keeper.config().index_path.clone(),
            })
        ),
        OutputFormat::Human => {
            if !cli.quiet {
                println!(
                    "mirrored {} pages to {}",
                    pages,
                    keeper.config().index_path
                );
            }
        }
    }
    Ok(())
}
