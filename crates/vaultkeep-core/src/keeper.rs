//! Vault event pipeline
//!
//! One [`Keeper`] per vault: it receives change events, consults the
//! archival rule engine, and applies the decisions through the injected
//! collaborators. Collaborator failures are logged and never abort the
//! pipeline; the next modification event retries naturally.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use walkdir::WalkDir;

use crate::config::VaultConfig;
use crate::engine::{decide_date_stamp, iso_date, ArchivePolicy, MARKDOWN_EXT};
use crate::error::{Result, VaultkeepError};
use crate::events::{vault_rel_path, EventKind, VaultEvent};
use crate::metadata::{FrontmatterStore, MetadataStore};
use crate::mirror::IndexMirror;
use crate::mover::{FileMover, FsMover};

/// What a single modification pass did to a note
#[derive(Debug, Default)]
pub struct ModifyOutcome {
    pub stamped: bool,
    pub archived_to: Option<String>,
}

/// Summary of a one-shot sweep over the whole vault
#[derive(Debug, Default, Serialize)]
pub struct SweepReport {
    /// Markdown notes visited
    pub notes: usize,
    /// Notes whose updated field was stamped
    pub stamped: usize,
    /// Notes renamed into the archive folder
    pub archived: usize,
    /// Pages written to the index mirror
    pub pages: usize,
}

/// The event pipeline for one vault
pub struct Keeper<M: MetadataStore, F: FileMover> {
    vault_root: PathBuf,
    config: VaultConfig,
    policy: ArchivePolicy,
    store: M,
    mover: F,
    mirror: IndexMirror,
}

impl Keeper<FrontmatterStore, FsMover> {
    /// Open a vault with the stock file-system collaborators, loading
    /// `vaultkeep.toml` when present
    pub fn open(vault_root: &Path) -> Result<Self> {
        if !vault_root.is_dir() {
            return Err(VaultkeepError::VaultNotFound {
                path: vault_root.to_path_buf(),
            });
        }
        let config = VaultConfig::load_or_default(vault_root)?;
        Ok(Keeper::with_collaborators(
            vault_root,
            config,
            FrontmatterStore::new(vault_root),
            FsMover::new(vault_root),
        ))
    }
}

impl<M: MetadataStore, F: FileMover> Keeper<M, F> {
    /// Build a pipeline with explicit collaborators (tests inject stubs
    /// here)
    pub fn with_collaborators(vault_root: &Path, config: VaultConfig, store: M, mover: F) -> Self {
        let policy = config.policy();
        let mirror = IndexMirror::new(vault_root, &config.index_path);
        Keeper {
            vault_root: vault_root.to_path_buf(),
            config,
            policy,
            store,
            mover,
            mirror,
        }
    }

    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    /// Handle one change notification.
    ///
    /// Modifications run the archival/stamping rules; any event touching a
    /// markdown path refreshes the index mirror (after the rules, so the
    /// dump reflects what the rules just did).
    pub fn handle_event(&self, event: &VaultEvent, today: NaiveDate) {
        if event.kind == EventKind::Modify {
            self.handle_modify(&event.path, today);
        }

        if event.path.contains(MARKDOWN_EXT) {
            if let Err(e) = self.mirror.refresh() {
                tracing::warn!(path = %event.path, error = %e, "index mirror refresh failed");
            }
        }
    }

    /// Run the rules for one modified note. Metadata is read fresh here,
    /// never cached across events: a stale snapshot would mis-decide.
    fn handle_modify(&self, path: &str, today: NaiveDate) -> ModifyOutcome {
        let status = self.store.field(path, &self.config.status_field);
        let updated_on = self.store.field(path, &self.config.updated_field);

        let mut outcome = ModifyOutcome::default();

        // Stamp before any rename so the write targets a path that still
        // exists
        if decide_date_stamp(path, updated_on.as_deref(), today) {
            match self
                .store
                .set_field(path, &self.config.updated_field, &iso_date(today))
            {
                Ok(()) => outcome.stamped = true,
                Err(e) => {
                    tracing::warn!(path, error = %e, "failed to stamp updated field");
                }
            }
        }

        let decision = self.policy.decide_archive(path, status.as_deref(), today);
        if let Some(new_path) = decision.new_path.as_deref() {
            match self.mover.rename(path, new_path) {
                Ok(()) => {
                    tracing::info!(from = path, to = new_path, "archived note");
                    outcome.archived_to = Some(new_path.to_string());
                }
                Err(e) => {
                    tracing::warn!(from = path, to = new_path, error = %e, "failed to archive note");
                }
            }
        }

        outcome
    }

    /// One-shot pass: treat every markdown note in the vault as modified,
    /// then refresh the mirror once
    pub fn sweep(&self, today: NaiveDate) -> Result<SweepReport> {
        // Collect paths up front; archival renames files while we work
        let mut notes = Vec::new();
        for entry in WalkDir::new(&self.vault_root)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(rel) = vault_rel_path(&self.vault_root, entry.path()) else {
                continue;
            };
            if rel.ends_with(MARKDOWN_EXT) {
                notes.push(rel);
            }
        }
        notes.sort();

        let mut report = SweepReport::default();
        for path in &notes {
            report.notes += 1;
            let outcome = self.handle_modify(path, today);
            if outcome.stamped {
                report.stamped += 1;
            }
            if outcome.archived_to.is_some() {
                report.archived += 1;
            }
        }
        report.pages = self.mirror.refresh()?;
        Ok(report)
    }

    /// Rewrite the index mirror from the current vault contents
    pub fn refresh_mirror(&self) -> Result<usize> {
        self.mirror.refresh()
    }
}
