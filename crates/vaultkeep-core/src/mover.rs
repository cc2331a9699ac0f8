//! Note relocation
//!
//! The pipeline moves notes through the [`FileMover`] seam. The stock
//! implementation renames on the local file system, creating the target
//! directory and refusing to clobber an existing destination.

use std::fs;
use std::path::PathBuf;

use crate::error::{Result, VaultkeepError};

/// Renames a note within the vault. Paths are vault-relative,
/// slash-separated strings.
pub trait FileMover {
    fn rename(&self, old_path: &str, new_path: &str) -> Result<()>;
}

/// File-system mover rooted at the vault directory
#[derive(Debug, Clone)]
pub struct FsMover {
    vault_root: PathBuf,
}

impl FsMover {
    pub fn new(vault_root: impl Into<PathBuf>) -> Self {
        FsMover {
            vault_root: vault_root.into(),
        }
    }
}

impl FileMover for FsMover {
    fn rename(&self, old_path: &str, new_path: &str) -> Result<()> {
        let from = self.vault_root.join(old_path);
        let to = self.vault_root.join(new_path);

        if to.exists() {
            return Err(VaultkeepError::already_exists(
                "destination",
                to.display(),
            ));
        }
        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::rename(&from, &to)?;
        Ok(())
    }
}
