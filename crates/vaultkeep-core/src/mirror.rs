//! Page-table index mirror
//!
//! Dumps the vault's page metadata to a JSON file so sibling tools can read
//! it without parsing every note: an array of `{key, value}` records, key =
//! vault-relative note path, value = the note's frontmatter fields. The
//! mirror is rewritten wholesale on every markdown change.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;
use walkdir::WalkDir;

use crate::engine::MARKDOWN_EXT;
use crate::error::Result;
use crate::events::vault_rel_path;
use crate::metadata::FrontmatterStore;

/// One page in the mirror dump
#[derive(Debug, Serialize)]
pub struct PageRecord {
    pub key: String,
    pub value: serde_json::Value,
}

/// Writes the vault page table to a fixed JSON file
#[derive(Debug)]
pub struct IndexMirror {
    vault_root: PathBuf,
    output: PathBuf,
}

impl IndexMirror {
    /// `index_path` is vault-relative (e.g. `Code/db.json`)
    pub fn new(vault_root: impl Into<PathBuf>, index_path: &str) -> Self {
        let vault_root = vault_root.into();
        let output = vault_root.join(index_path);
        IndexMirror { vault_root, output }
    }

    /// Where the mirror file is written
    pub fn output_path(&self) -> &Path {
        &self.output
    }

    /// Rewrite the mirror from the current vault contents.
    ///
    /// Returns the number of pages dumped. Notes without parseable
    /// frontmatter appear with an empty object value.
    pub fn refresh(&self) -> Result<usize> {
        let start = Instant::now();
        let store = FrontmatterStore::new(&self.vault_root);

        let mut records = Vec::new();
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
            // Same filter the host applies to index refreshes: a substring
            // check, not an extension check
            if !rel.contains(MARKDOWN_EXT) {
                continue;
            }

            let value = store
                .fields(&rel)
                .and_then(|mapping| serde_json::to_value(&mapping).ok())
                .unwrap_or_else(|| serde_json::json!({}));
            records.push(PageRecord { key: rel, value });
        }
        records.sort_by(|a, b| a.key.cmp(&b.key));

        if let Some(parent) = self.output.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.output, serde_json::to_string_pretty(&records)?)?;

        tracing::debug!(
            elapsed = ?start.elapsed(),
            pages = records.len(),
            output = %self.output.display(),
            "index mirror refreshed"
        );
        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_note(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_refresh_dumps_key_value_records() {
        let dir = tempdir().unwrap();
        write_note(
            dir.path(),
            "Tasks/Write report.md",
            "---\nstatus: Completed\n---\n\nBody.\n",
        );
        write_note(dir.path(), "Notes/Plain.md", "No frontmatter here.\n");
        write_note(dir.path(), "assets/photo.png", "binary-ish");

        let mirror = IndexMirror::new(dir.path(), "Code/db.json");
        let count = mirror.refresh().unwrap();
        assert_eq!(count, 2);

        let dump = fs::read_to_string(dir.path().join("Code/db.json")).unwrap();
        let records: serde_json::Value = serde_json::from_str(&dump).unwrap();
        let records = records.as_array().unwrap();
        assert_eq!(records.len(), 2);

        // Sorted by key
        assert_eq!(records[0]["key"], "Notes/Plain.md");
        assert_eq!(records[0]["value"], serde_json::json!({}));
        assert_eq!(records[1]["key"], "Tasks/Write report.md");
        assert_eq!(records[1]["value"]["status"], "Completed");
    }

    #[test]
    fn test_refresh_overwrites_previous_dump() {
        let dir = tempdir().unwrap();
        write_note(dir.path(), "Notes/A.md", "---\nstatus: Open\n---\n");

        let mirror = IndexMirror::new(dir.path(), "Code/db.json");
        mirror.refresh().unwrap();

        fs::remove_file(dir.path().join("Notes/A.md")).unwrap();
        write_note(dir.path(), "Notes/B.md", "---\nstatus: Closed\n---\n");
        let count = mirror.refresh().unwrap();
        assert_eq!(count, 1);

        let dump = fs::read_to_string(mirror.output_path()).unwrap();
        assert!(dump.contains("Notes/B.md"));
        assert!(!dump.contains("Notes/A.md"));
    }

    #[test]
    fn test_empty_vault_writes_empty_array() {
        let dir = tempdir().unwrap();
        let mirror = IndexMirror::new(dir.path(), "Code/db.json");
        assert_eq!(mirror.refresh().unwrap(), 0);
        let dump = fs::read_to_string(mirror.output_path()).unwrap();
        assert_eq!(dump.trim(), "[]");
    }
}
