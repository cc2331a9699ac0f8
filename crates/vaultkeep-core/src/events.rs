//! Vault change events
//!
//! The explicit subscription surface between an event source (the CLI's
//! file watcher, a host runtime, a test) and the pipeline. One event per
//! affected note, delivered in order.

use std::path::Path;

/// What happened to the note
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Create,
    Modify,
    Delete,
    /// The note moved; `old_path` is where it used to live
    Rename { old_path: String },
}

/// A single change notification for a vault-relative path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultEvent {
    pub path: String,
    pub kind: EventKind,
}

impl VaultEvent {
    pub fn create(path: impl Into<String>) -> Self {
        VaultEvent {
            path: path.into(),
            kind: EventKind::Create,
        }
    }

    pub fn modify(path: impl Into<String>) -> Self {
        VaultEvent {
            path: path.into(),
            kind: EventKind::Modify,
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        VaultEvent {
            path: path.into(),
            kind: EventKind::Delete,
        }
    }

    pub fn rename(old_path: impl Into<String>, new_path: impl Into<String>) -> Self {
        VaultEvent {
            path: new_path.into(),
            kind: EventKind::Rename {
                old_path: old_path.into(),
            },
        }
    }
}

/// Vault-relative, slash-separated form of a file-system path, as event
/// paths and decision inputs are spelled everywhere else. `None` for paths
/// outside the root and for the root itself.
pub fn vault_rel_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let rel = rel.to_string_lossy().replace('\\', "/");
    if rel.is_empty() {
        None
    } else {
        Some(rel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_vault_rel_path_uses_forward_slashes() {
        let root = PathBuf::from("/vault");
        assert_eq!(
            vault_rel_path(&root, &root.join("Tasks/Write report.md")).as_deref(),
            Some("Tasks/Write report.md")
        );
        // Backslash separators come out normalized
        assert_eq!(
            vault_rel_path(&root, &root.join("Tasks\\Write report.md")).as_deref(),
            Some("Tasks/Write report.md")
        );
    }

    #[test]
    fn test_vault_rel_path_rejects_outside_and_root() {
        let root = PathBuf::from("/vault");
        assert_eq!(vault_rel_path(&root, Path::new("/elsewhere/note.md")), None);
        assert_eq!(vault_rel_path(&root, &root), None);
    }
}
