//! Pull history persistence module
//!
//! Reads and writes the history file: a pretty-printed JSON array of
//! pull records, rewritten in full on every change.

use std::fs;
use std::path::{Path, PathBuf};
use crate::{SlotCountError, Result};
use crate::models::PullRecord;

/// History file manager
#[derive(Debug, Clone)]
pub struct HistoryStorage {
    history_path: PathBuf,
}

impl HistoryStorage {
    /// Create a storage manager for the given file
    pub fn new(history_path: impl Into<PathBuf>) -> Self {
        Self {
            history_path: history_path.into(),
        }
    }

    /// Load all records. A missing file is an empty history.
    pub fn load_history(&self) -> Result<Vec<PullRecord>> {
        if !self.history_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.history_path)
            .map_err(|e| SlotCountError::PersistenceError(
                format!("Failed to read history file {}: {}", self.history_path.display(), e)
            ))?;

        let records: Vec<PullRecord> = serde_json::from_str(&content)
            .map_err(|e| SlotCountError::PersistenceError(
                format!("Failed to parse history file {}: {}", self.history_path.display(), e)
            ))?;

        Ok(records)
    }

    /// Overwrite the history file with the given records
    pub fn save_history(&self, records: &[PullRecord]) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = self.history_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| SlotCountError::PersistenceError(
                        format!("Failed to create history directory {}: {}", parent.display(), e)
                    ))?;
            }
        }

        let content = serde_json::to_string_pretty(records)?;

        fs::write(&self.history_path, content)
            .map_err(|e| SlotCountError::PersistenceError(
                format!("Failed to write history file {}: {}", self.history_path.display(), e)
            ))?;

        Ok(())
    }

    /// Get history file path for external access
    pub fn get_history_path(&self) -> &Path {
        &self.history_path
    }
}
