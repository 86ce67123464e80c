//! Storage layer for TripBuddy
//!
//! The whole trip state is saved as one JSON snapshot. Saves are atomic, so a
//! failed save leaves the previous file in place.

pub mod file_io;
pub mod snapshot;

pub use file_io::{read_json, write_json_atomic};
pub use snapshot::{ExpenseRecord, Snapshot};

use std::path::{Path, PathBuf};

use crate::error::{TripError, TripResult};

/// Reads and writes the trip snapshot file
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Create a store backed by the given file
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot, or `None` if nothing has been saved yet
    pub fn load(&self) -> TripResult<Option<Snapshot>> {
        let Some(value) = read_json(&self.path)? else {
            tracing::info!(path = %self.path.display(), "no saved data, starting fresh");
            return Ok(None);
        };

        let snapshot = Snapshot::from_json(&value)?;
        tracing::info!(
            path = %self.path.display(),
            expenses = snapshot.expenses.len(),
            categories = snapshot.categories.len(),
            "loaded snapshot"
        );
        Ok(Some(snapshot))
    }

    /// Save the snapshot, replacing any previous one
    pub fn save(&self, snapshot: &Snapshot) -> TripResult<()> {
        write_json_atomic(&self.path, &snapshot.to_json())?;
        tracing::info!(path = %self.path.display(), "saved snapshot");
        Ok(())
    }

    /// Where an unreadable snapshot is kept, e.g. `tripbuddy.json.bak`
    pub fn backup_path(&self) -> PathBuf {
        self.path.with_extension("json.bak")
    }

    /// Move the current file to [`backup_path`](Self::backup_path) so a later
    /// save cannot overwrite it. An existing backup is replaced.
    pub fn set_aside(&self) -> TripResult<PathBuf> {
        let backup = self.backup_path();
        std::fs::rename(&self.path, &backup).map_err(|e| {
            TripError::Io(format!(
                "Failed to move {} to {}: {}",
                self.path.display(),
                backup.display(),
                e
            ))
        })?;
        tracing::warn!(from = %self.path.display(), to = %backup.display(), "set aside unreadable snapshot");
        Ok(backup)
    }
}
