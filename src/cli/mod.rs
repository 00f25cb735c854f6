//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand
//! and returns the process exit code.

mod answer;
mod assess;
mod snapshot;
mod validate;

pub use answer::{run_answer, run_reset};
pub use assess::run_assess;
pub use snapshot::{
    run_snapshot_compare, run_snapshot_delete, run_snapshot_list, run_snapshot_load,
    run_snapshot_save,
};
pub use validate::run_validate;

use crate::config::{ReferenceConfig, StorageConfig};
use crate::reference::ReferenceData;
use crate::storage::{FileAnswerStore, SnapshotStore};
use anyhow::{Context, Result};

/// Load the reference bundle, falling back to bundled data for unset paths.
pub(crate) fn load_reference(config: &ReferenceConfig) -> Result<ReferenceData> {
    ReferenceData::load(
        config.taxonomy.as_deref(),
        config.questions.as_deref(),
        config.gap_rules.as_deref(),
    )
    .context("Failed to load reference data")
}

/// Open the configured answer store.
pub(crate) fn open_store(config: &StorageConfig) -> Result<FileAnswerStore> {
    config
        .resolved_path()
        .map(FileAnswerStore::new)
        .context("No data directory available; set storage.autosave_path in the config file")
}

/// Open the snapshot list kept beside the configured answer store.
pub(crate) fn open_snapshots(config: &StorageConfig) -> Result<SnapshotStore> {
    open_store(config).map(|store| SnapshotStore::beside(store.path()))
}
