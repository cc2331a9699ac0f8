use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::Path;

pub fn vaultkeep() -> Command {
    cargo_bin_cmd!("vaultkeep")
}

/// Write a note with a frontmatter block into the vault
#[allow(dead_code)]
pub fn write_note(vault: &Path, rel: &str, frontmatter: &str, body: &str) {
    let path = vault.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, format!("---\n{}\n---\n\n{}\n", frontmatter, body)).unwrap();
}

#[allow(dead_code)]
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
