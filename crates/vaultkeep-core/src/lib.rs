//! Vaultkeep Core Library
//!
//! Core domain logic for the vaultkeep vault housekeeping tool: the
//! archival rule engine, the frontmatter metadata store, the vault event
//! pipeline, and the page-table index mirror.

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod keeper;
pub mod logging;
pub mod metadata;
pub mod mirror;
pub mod mover;
