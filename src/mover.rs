//! Conflict-safe placement of grouped files into their destination folder.
//!
//! Moves never overwrite an existing file: collisions get a bounded numeric
//! suffix instead, and per-file failures are recorded as values rather than
//! aborting the rest of the group.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::resolve_conflict_free_path;

/// Maximum numeric suffixes tried before giving up on a conflicting name.
pub const MAX_CONFLICT_ATTEMPTS: u32 = 100;

/// Result of one attempted file placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MoveOutcome {
    /// File was moved, possibly under a suffixed name.
    Moved { destination: PathBuf },
    /// Source was gone or already at its destination. Groups are resolved
    /// independently, so a vanished source is an expected race, not an error.
    AlreadyPlaced,
    /// All [`MAX_CONFLICT_ATTEMPTS`] suffixed names were taken.
    ConflictExhausted,
    /// The move itself failed.
    Failed { error: String },
}

/// Per-file record of a placement attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMove {
    pub file_name: String,
    #[serde(flatten)]
    pub outcome: MoveOutcome,
}

impl FileMove {
    const fn new(file_name: String, outcome: MoveOutcome) -> Self {
        Self { file_name, outcome }
    }
}

/// Move every file of a group into `source_dir/label`.
///
/// The destination folder is created if missing; a creation failure fails
/// the whole group before any file is touched. Individual move failures
/// never abort the remaining files and are returned as [`MoveOutcome`]
/// values instead.
///
/// # Errors
/// Returns an error only when the destination folder cannot be created.
pub fn place_group(source_dir: &Path, group: &[String], label: &str) -> Result<Vec<FileMove>> {
    let folder_path = source_dir.join(label);
    fs::create_dir_all(&folder_path)
        .with_context(|| format!("Failed to create group folder '{}'", folder_path.display()))?;

    let mut results = Vec::with_capacity(group.len());
    for file_name in group {
        let source = source_dir.join(file_name);
        if !source.exists() {
            // Already moved by an earlier group resolution.
            results.push(FileMove::new(file_name.clone(), MoveOutcome::AlreadyPlaced));
            continue;
        }

        let destination = folder_path.join(file_name);
        if source == destination {
            results.push(FileMove::new(file_name.clone(), MoveOutcome::AlreadyPlaced));
            continue;
        }

        let Some(destination) = resolve_conflict_free_path(&destination, MAX_CONFLICT_ATTEMPTS) else {
            results.push(FileMove::new(file_name.clone(), MoveOutcome::ConflictExhausted));
            continue;
        };

        let outcome = match move_file(&source, &destination) {
            Ok(()) => MoveOutcome::Moved { destination },
            Err(error) => MoveOutcome::Failed {
                error: error.to_string(),
            },
        };
        results.push(FileMove::new(file_name.clone(), outcome));
    }
    Ok(results)
}

/// Rename a file, falling back to copy and delete when the rename fails,
/// e.g. for moves across filesystems.
fn move_file(source: &Path, destination: &Path) -> std::io::Result<()> {
    if fs::rename(source, destination).is_ok() {
        return Ok(());
    }
    fs::copy(source, destination)?;
    fs::remove_file(source)
}
