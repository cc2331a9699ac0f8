//! Note metadata access
//!
//! The pipeline reads and writes note metadata through the narrow
//! [`MetadataStore`] seam; the stock implementation is YAML frontmatter on
//! the note files themselves. Read failures (missing file, unparseable
//! header, absent field) collapse to "absent" rather than erroring, so
//! eligibility checks downstream fail naturally.

use std::fs;
use std::path::PathBuf;

use serde_yaml::{Mapping, Value};

use crate::error::{Result, VaultkeepError};

/// Read/write access to named metadata fields on a note.
///
/// Paths are vault-relative, slash-separated strings.
pub trait MetadataStore {
    /// Read a field value, or `None` when the note or field is unreadable
    fn field(&self, path: &str, name: &str) -> Option<String>;

    /// Write a field value, creating the field (and the frontmatter block)
    /// when missing
    fn set_field(&self, path: &str, name: &str, value: &str) -> Result<()>;
}

/// Metadata store over YAML frontmatter blocks
#[derive(Debug, Clone)]
pub struct FrontmatterStore {
    vault_root: PathBuf,
}

impl FrontmatterStore {
    pub fn new(vault_root: impl Into<PathBuf>) -> Self {
        FrontmatterStore {
            vault_root: vault_root.into(),
        }
    }

    fn file_path(&self, path: &str) -> PathBuf {
        self.vault_root.join(path)
    }

    /// All frontmatter fields of a note, or `None` when the file cannot be
    /// read or carries no parseable frontmatter
    pub fn fields(&self, path: &str) -> Option<Mapping> {
        let content = fs::read_to_string(self.file_path(path)).ok()?;
        let (yaml, _) = split_frontmatter(&content)?;
        parse_mapping(yaml).ok()
    }
}

impl MetadataStore for FrontmatterStore {
    fn field(&self, path: &str, name: &str) -> Option<String> {
        let mapping = self.fields(path)?;
        scalar_to_string(mapping.get(name)?)
    }

    fn set_field(&self, path: &str, name: &str, value: &str) -> Result<()> {
        let file = self.file_path(path);
        let content = fs::read_to_string(&file)?;

        let (mut mapping, body) = match split_frontmatter(&content) {
            Some((yaml, body)) => {
                let mapping =
                    parse_mapping(yaml).map_err(|e| VaultkeepError::InvalidFrontmatter {
                        path: file.clone(),
                        reason: e.to_string(),
                    })?;
                (mapping, body.to_string())
            }
            // No frontmatter yet: the whole file is body
            None => (Mapping::new(), content),
        };

        mapping.insert(
            Value::String(name.to_string()),
            Value::String(value.to_string()),
        );

        let yaml = serde_yaml::to_string(&mapping)?;
        fs::write(&file, format!("---\n{}---\n\n{}", yaml, body))?;
        Ok(())
    }
}

/// Split markdown content into its frontmatter YAML and body.
///
/// Returns `None` when the content does not open with a `---` block.
pub(crate) fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let content = content.trim_start();
    let after_first = content.strip_prefix("---")?;
    let end = after_first.find("\n---")?;

    let yaml = &after_first[..end];
    let body = after_first[end + 4..].trim_start_matches('\n');
    Some((yaml, body))
}

fn parse_mapping(yaml: &str) -> std::result::Result<Mapping, serde_yaml::Error> {
    if yaml.trim().is_empty() {
        return Ok(Mapping::new());
    }
    serde_yaml::from_str(yaml)
}

/// Render a scalar YAML value as the string form metadata consumers see.
/// Sequences and nested mappings have no single-string form and read as
/// absent.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
