mod common;

use common::{today, vaultkeep, write_note};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_sweep_archives_completed_task() {
    let vault = tempdir().unwrap();
    write_note(
        vault.path(),
        "Tasks/Write report.md",
        "status: Completed",
        "Finish by Friday.",
    );

    vaultkeep()
        .arg("--vault")
        .arg(vault.path())
        .arg("sweep")
        .assert()
        .success();

    assert!(!vault.path().join("Tasks/Write report.md").exists());
    let archived = vault
        .path()
        .join("Tasks/Archive")
        .join(format!("{} Write report.md", today()));
    let content = fs::read_to_string(&archived).unwrap();
    assert!(content.contains("status: Completed"));
    assert!(content.contains(&format!("updated_on: {}", today())));
    assert!(content.contains("Finish by Friday."));
}

#[test]
fn test_sweep_leaves_open_tasks_alone() {
    let vault = tempdir().unwrap();
    write_note(
        vault.path(),
        "Tasks/Open item.md",
        "status: In Progress",
        "Still going.",
    );

    vaultkeep()
        .arg("--vault")
        .arg(vault.path())
        .arg("sweep")
        .assert()
        .success();

    // Not archived, but the updated field is stamped
    let content = fs::read_to_string(vault.path().join("Tasks/Open item.md")).unwrap();
    assert!(content.contains("status: In Progress"));
    assert!(content.contains(&format!("updated_on: {}", today())));
    assert!(!vault.path().join("Tasks/Archive").exists());
}

#[test]
fn test_sweep_ignores_non_markdown_files() {
    let vault = tempdir().unwrap();
    fs::create_dir_all(vault.path().join("Tasks")).unwrap();
    fs::write(
        vault.path().join("Tasks/Plan.txt"),
        "---\nstatus: Completed\n---\n\nNot a note.\n",
    )
    .unwrap();

    vaultkeep()
        .arg("--vault")
        .arg(vault.path())
        .arg("sweep")
        .assert()
        .success();

    let content = fs::read_to_string(vault.path().join("Tasks/Plan.txt")).unwrap();
    assert!(!content.contains("updated_on"));
    assert!(!vault.path().join("Tasks/Archive").exists());
}

#[test]
fn test_sweep_twice_is_idempotent() {
    let vault = tempdir().unwrap();
    write_note(
        vault.path(),
        "Tasks/Write report.md",
        "status: Completed",
        "Done.",
    );

    for _ in 0..2 {
        vaultkeep()
            .arg("--vault")
            .arg(vault.path())
            .arg("sweep")
            .assert()
            .success();
    }

    // Exactly one archived copy, with a single date prefix
    let archive_dir = vault.path().join("Tasks/Archive");
    let entries: Vec<_> = fs::read_dir(&archive_dir).unwrap().collect();
    assert_eq!(entries.len(), 1);
    let name = entries[0]
        .as_ref()
        .unwrap()
        .file_name()
        .to_string_lossy()
        .to_string();
    assert_eq!(name, format!("{} Write report.md", today()));
}

#[test]
fn test_sweep_json_report() {
    let vault = tempdir().unwrap();
    write_note(
        vault.path(),
        "Tasks/Write report.md",
        "status: Completed",
        "Done.",
    );
    write_note(vault.path(), "Notes/Meeting.md", "topic: sync", "Minutes.");

    let output = vaultkeep()
        .arg("--vault")
        .arg(vault.path())
        .arg("--format")
        .arg("json")
        .arg("sweep")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["notes"], 2);
    assert_eq!(report["archived"], 1);
    assert_eq!(report["stamped"], 2);
    assert_eq!(report["pages"], 2);
}

#[test]
fn test_sweep_respects_vault_config() {
    let vault = tempdir().unwrap();
    fs::write(
        vault.path().join("vaultkeep.toml"),
        "tasks_folder = \"Todo\"\narchive_folder = \"Done\"\narchive_statuses = [\"Finished\"]\n",
    )
    .unwrap();
    write_note(vault.path(), "Todo/Ship it.md", "status: Finished", "Go.");

    vaultkeep()
        .arg("--vault")
        .arg(vault.path())
        .arg("sweep")
        .assert()
        .success();

    assert!(vault
        .path()
        .join("Todo/Done")
        .join(format!("{} Ship it.md", today()))
        .exists());
}
