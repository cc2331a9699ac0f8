//! Vault configuration for vaultkeep
//!
//! Configuration lives in `vaultkeep.toml` at the vault root. Every field
//! has a default matching the stock behavior, so a vault without a config
//! file works out of the box.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::ArchivePolicy;
use crate::error::Result;

/// Config file name, resolved relative to the vault root
pub const CONFIG_FILE: &str = "vaultkeep.toml";

/// Vault-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    /// Folder name marking task notes
    pub tasks_folder: String,
    /// Folder name completed tasks are archived into
    pub archive_folder: String,
    /// Status values that trigger archival
    pub archive_statuses: Vec<String>,
    /// Frontmatter field holding the task status
    pub status_field: String,
    /// Frontmatter field stamped with today's date on modification
    pub updated_field: String,
    /// Vault-relative path of the JSON page-table mirror
    pub index_path: String,
    /// Free-text label, carried in config but unused by the rules
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Default for VaultConfig {
    fn default() -> Self {
        VaultConfig {
            tasks_folder: "Tasks".to_string(),
            archive_folder: "Archive".to_string(),
            archive_statuses: vec!["Completed".to_string(), "Closed".to_string()],
            status_field: "status".to_string(),
            updated_field: "updated_on".to_string(),
            index_path: "Code/db.json".to_string(),
            label: None,
        }
    }
}

impl VaultConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: VaultConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config from a vault root, falling back to defaults when the
    /// file is missing
    pub fn load_or_default(vault_root: &Path) -> Result<Self> {
        let path = vault_root.join(CONFIG_FILE);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::VaultkeepError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// The archival rules this configuration describes
    pub fn policy(&self) -> ArchivePolicy {
        ArchivePolicy {
            tasks_folder: self.tasks_folder.clone(),
            archive_folder: self.archive_folder.clone(),
            archive_statuses: self.archive_statuses.clone(),
        }
    }
}
