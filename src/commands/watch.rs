//! `vaultkeep watch` - run the rules on live file-system events
//!
//! A recursive notify watcher feeds the pipeline. Create/modify bursts are
//! debounced per path so editors that write in several steps trigger one
//! pass; removals and renames are handled immediately.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Local;
use notify::event::ModifyKind;
use notify::{Config, EventKind as NotifyKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::cli::{Cli, OutputFormat};
use vaultkeep_core::error::{Result, VaultkeepError};
use vaultkeep_core::events::{vault_rel_path, EventKind, VaultEvent};
use vaultkeep_core::keeper::Keeper;
use vaultkeep_core::metadata::FrontmatterStore;
use vaultkeep_core::mover::FsMover;

type VaultKeeper = Keeper<FrontmatterStore, FsMover>;

pub fn run(cli: &Cli, vault: &Path, debounce_ms: u64) -> Result<()> {
    let keeper = Keeper::open(vault)?;
    // notify reports absolute paths; canonicalize so strip_prefix holds
    let vault: PathBuf = vault.canonicalize()?;

    let (tx, rx) = mpsc::channel();
    let mut watcher = RecommendedWatcher::new(tx, Config::default())
        .map_err(|e| VaultkeepError::failed_operation("start file watcher", e))?;
    watcher
        .watch(&vault, RecursiveMode::Recursive)
        .map_err(|e| VaultkeepError::failed_operation("watch vault", e))?;

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = Arc::clone(&running);
        let _ = ctrlc::set_handler(move || running.store(false, Ordering::SeqCst));
    }

    if !cli.quiet && cli.format == OutputFormat::Human {
        println!("watching {} (ctrl-c to stop)", vault.display());
    }

    let debounce = Duration::from_millis(debounce_ms);
    // Paths seen recently, waiting for their event burst to settle
    let mut pending: HashMap<String, (EventKind, Instant)> = HashMap::new();

    while running.load(Ordering::SeqCst) {
        match rx.recv_timeout(debounce) {
            Ok(Ok(event)) => collect_event(&keeper, &vault, &event, &mut pending),
            Ok(Err(e)) => tracing::warn!(error = %e, "file watcher error"),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
        flush_settled(&keeper, &mut pending, debounce);
    }

    // Drain whatever was still settling when we were told to stop
    for (path, (kind, _)) in pending.drain() {
        dispatch(&keeper, VaultEvent { path, kind });
    }
    Ok(())
}

/// Translate one notify event into pipeline work. Removals and renames act
/// immediately; creates and modifications wait out the debounce window.
fn collect_event(
    keeper: &VaultKeeper,
    vault: &Path,
    event: &notify::Event,
    pending: &mut HashMap<String, (EventKind, Instant)>,
) {
    match &event.kind {
        NotifyKind::Modify(ModifyKind::Name(_)) if event.paths.len() == 2 => {
            let old = rel_path(keeper, vault, &event.paths[0]);
            let new = rel_path(keeper, vault, &event.paths[1]);
            if let (Some(old), Some(new)) = (old, new) {
                pending.remove(&old);
                dispatch(keeper, VaultEvent::rename(old, new));
            }
        }
        NotifyKind::Remove(_) => {
            for path in &event.paths {
                if let Some(rel) = rel_path(keeper, vault, path) {
                    pending.remove(&rel);
                    dispatch(keeper, VaultEvent::delete(rel));
                }
            }
        }
        NotifyKind::Create(_) | NotifyKind::Modify(_) | NotifyKind::Any | NotifyKind::Other => {
            let now = Instant::now();
            let kind = if matches!(event.kind, NotifyKind::Create(_)) {
                EventKind::Create
            } else {
                EventKind::Modify
            };
            for path in &event.paths {
                if let Some(rel) = rel_path(keeper, vault, path) {
                    // A modify supersedes a pending create for the same path
                    let entry = pending.entry(rel).or_insert((kind.clone(), now));
                    if kind == EventKind::Modify {
                        entry.0 = EventKind::Modify;
                    }
                    entry.1 = now;
                }
            }
        }
        NotifyKind::Access(_) => {}
    }
}

/// Dispatch pending paths whose last event is older than the debounce
fn flush_settled(
    keeper: &VaultKeeper,
    pending: &mut HashMap<String, (EventKind, Instant)>,
    debounce: Duration,
) {
    let now = Instant::now();
    let settled: Vec<String> = pending
        .iter()
        .filter(|(_, (_, seen))| now.duration_since(*seen) >= debounce)
        .map(|(path, _)| path.clone())
        .collect();
    for path in settled {
        if let Some((kind, _)) = pending.remove(&path) {
            dispatch(keeper, VaultEvent { path, kind });
        }
    }
}

fn dispatch(keeper: &VaultKeeper, event: VaultEvent) {
    tracing::debug!(path = %event.path, kind = ?event.kind, "vault event");
    keeper.handle_event(&event, Local::now().date_naive());
}

/// Vault-relative, slash-separated path; `None` for paths outside the
/// vault, the vault root itself, or the mirror output (its own rewrite
/// would otherwise echo back as an event)
fn rel_path(keeper: &VaultKeeper, vault: &Path, path: &Path) -> Option<String> {
    let rel = vault_rel_path(vault, path)?;
    if rel == keeper.config().index_path {
        return None;
    }
    Some(rel)
}
