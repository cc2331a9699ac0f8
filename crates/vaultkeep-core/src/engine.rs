//! Archival rule engine
//!
//! Pure decision logic: given a note path, its metadata fields, and an
//! injected calendar date, decide whether the note should be renamed into
//! the archive folder and whether its last-updated field needs a refresh.
//! No I/O happens here; callers apply the decisions through
//! [`crate::metadata::MetadataStore`] and [`crate::mover::FileMover`].

use chrono::NaiveDate;
use regex::Regex;

/// Extension marker for notes. Case-sensitive, checked at the end of the
/// path for engine eligibility.
pub const MARKDOWN_EXT: &str = ".md";

/// Format a date the way note metadata stores it (ISO `YYYY-MM-DD`).
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Folder names and trigger statuses the archival rules run against.
///
/// Folder membership is substring containment on the whole path, and the
/// date-stamp check is an unanchored match on the filename. Both are
/// deliberate: a path like `MyTasksArchive/x.md` counts as inside both
/// folders, and a filename with any incidental `NNNN-NN-NN` run counts as
/// already stamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivePolicy {
    /// Folder name marking a note as a task (default "Tasks")
    pub tasks_folder: String,
    /// Folder name notes are archived into (default "Archive")
    pub archive_folder: String,
    /// Status values that trigger archival (default Completed, Closed)
    pub archive_statuses: Vec<String>,
}

impl Default for ArchivePolicy {
    fn default() -> Self {
        ArchivePolicy {
            tasks_folder: "Tasks".to_string(),
            archive_folder: "Archive".to_string(),
            archive_statuses: vec!["Completed".to_string(), "Closed".to_string()],
        }
    }
}

/// Outcome of [`ArchivePolicy::decide_archive`].
///
/// `new_path` is present exactly when `should_archive` is true; a computed
/// path identical to the input is suppressed as a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveDecision {
    pub should_archive: bool,
    pub new_path: Option<String>,
}

impl ArchiveDecision {
    /// The negative decision: leave the note where it is.
    pub fn keep() -> Self {
        ArchiveDecision {
            should_archive: false,
            new_path: None,
        }
    }
}

impl ArchivePolicy {
    /// Decide whether a note should be renamed into the archive folder.
    ///
    /// Filters, in order: markdown extension, tasks-folder membership,
    /// trigger status. Eligible notes get a `"{today} "` filename prefix
    /// unless the filename already carries a date-like run, and an
    /// `Archive/` directory inserted as a sibling of the file unless the
    /// path already sits under one.
    pub fn decide_archive(
        &self,
        path: &str,
        status: Option<&str>,
        today: NaiveDate,
    ) -> ArchiveDecision {
        if !path.ends_with(MARKDOWN_EXT) {
            return ArchiveDecision::keep();
        }
        if !path.contains(&self.tasks_folder) {
            return ArchiveDecision::keep();
        }
        let Some(status) = status else {
            return ArchiveDecision::keep();
        };
        if !self.archive_statuses.iter().any(|s| s == status) {
            return ArchiveDecision::keep();
        }

        let (dir, name) = match path.rsplit_once('/') {
            Some((dir, name)) => (dir, name),
            None => ("", path),
        };

        let new_name = if has_date_stamp(name) {
            name.to_string()
        } else {
            format!("{} {}", iso_date(today), name)
        };

        let in_archive = path.contains(&self.archive_folder);
        let new_path = if in_archive {
            if dir.is_empty() {
                new_name
            } else {
                format!("{}/{}", dir, new_name)
            }
        } else if dir.is_empty() {
            format!("{}/{}", self.archive_folder, new_name)
        } else {
            format!("{}/{}/{}", dir, self.archive_folder, new_name)
        };

        if new_path == path {
            ArchiveDecision::keep()
        } else {
            ArchiveDecision {
                should_archive: true,
                new_path: Some(new_path),
            }
        }
    }
}

/// Decide whether the last-updated field needs a refresh.
///
/// True for any markdown note whose `updated_on` is absent or differs
/// (string equality) from today's ISO date.
pub fn decide_date_stamp(path: &str, updated_on: Option<&str>, today: NaiveDate) -> bool {
    if !path.ends_with(MARKDOWN_EXT) {
        return false;
    }
    match updated_on {
        Some(value) => value != iso_date(today),
        None => true,
    }
}

/// True when the filename contains a date-like `NNNN-NN-NN` run anywhere.
fn has_date_stamp(name: &str) -> bool {
    let date_re = Regex::new(r"\d{4}-\d{2}-\d{2}").expect("valid date regex");
    date_re.is_match(name)
}
