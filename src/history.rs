//! Search history persistence
//!
//! Stores previously searched cities as a JSON array in a single flat
//! file. Every operation is a whole-file read, in-memory modify, whole-file
//! write with no locking: two requests mutating history at the same time
//! can race, and the last write wins. That lost-update window is an
//! accepted limitation of the flat-file design, not something callers need
//! to guard against.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::WeathervaneError;
use crate::models::HistoryEntry;

/// Flat-file store for the deduplicated city search history
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// Create a store backed by the given file path.
    ///
    /// The file is not touched until the first operation; a missing file
    /// reads as empty history.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// List all recorded cities
    pub async fn cities(&self) -> Result<Vec<HistoryEntry>, WeathervaneError> {
        self.read().await
    }

    /// Record a city, deduplicating case-insensitively on name.
    ///
    /// Returns the existing entry unchanged when the name is already
    /// present; otherwise appends a new entry with a fresh id.
    pub async fn add(&self, name: &str) -> Result<HistoryEntry, WeathervaneError> {
        let mut entries = self.read().await?;

        let wanted = name.to_lowercase();
        if let Some(existing) = entries.iter().find(|e| e.name.to_lowercase() == wanted) {
            debug!("City '{name}' already in history as '{}'", existing.name);
            return Ok(existing.clone());
        }

        let entry = HistoryEntry::new(name);
        info!("Recording '{name}' in search history");
        entries.push(entry.clone());
        self.write(&entries).await?;

        Ok(entry)
    }

    /// Remove the entry with the given id, leaving others untouched.
    ///
    /// Removing an unknown id is a no-op, not an error.
    pub async fn remove(&self, id: &str) -> Result<(), WeathervaneError> {
        let entries = self.read().await?;
        let remaining: Vec<HistoryEntry> =
            entries.into_iter().filter(|e| e.id != id).collect();
        self.write(&remaining).await
    }

    async fn read(&self) -> Result<Vec<HistoryEntry>, WeathervaneError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(WeathervaneError::storage(format!(
                    "Failed to read history file {}: {e}",
                    self.path.display()
                )));
            }
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            WeathervaneError::storage(format!(
                "History file {} is not a valid city list: {e}",
                self.path.display()
            ))
        })
    }

    async fn write(&self, entries: &[HistoryEntry]) -> Result<(), WeathervaneError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    WeathervaneError::storage(format!(
                        "Failed to create history directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        let json = serde_json::to_vec_pretty(entries).map_err(|e| {
            WeathervaneError::storage(format!("Failed to serialize history: {e}"))
        })?;

        tokio::fs::write(&self.path, json).await.map_err(|e| {
            WeathervaneError::storage(format!(
                "Failed to write history file {}: {e}",
                self.path.display()
            ))
        })
    }
}
