//! Persisted run history: a JSON array of runs in a single file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StoreError;
use crate::run::TestRun;

/// Run history stored as one JSON array.
///
/// Appending reads the whole file, pushes one entry and writes the file back.
/// Only one process may append to a given path at a time; concurrent writers
/// lose each other's entries. Existing entries are carried over untouched,
/// so older records with extra or missing fields survive an append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultStore {
    path: PathBuf,
}

impl ResultStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every stored entry as raw JSON.
    ///
    /// An absent or blank file is an empty history.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or is not a JSON array.
    pub async fn load_raw(&self) -> Result<Vec<serde_json::Value>, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source: err,
                });
            }
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|err| StoreError::Corrupt {
            path: self.path.clone(),
            source: err,
        })
    }

    /// Reads every stored entry as a typed run.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or an entry is not a run.
    pub async fn load(&self) -> Result<Vec<TestRun>, StoreError> {
        self.load_raw()
            .await?
            .into_iter()
            .map(|entry| {
                serde_json::from_value(entry).map_err(|err| StoreError::Corrupt {
                    path: self.path.clone(),
                    source: err,
                })
            })
            .collect()
    }

    /// Appends `run` and returns the number of stored runs afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error when the existing file is unreadable or malformed, or
    /// the new content cannot be written. A malformed file is left as is.
    pub async fn append(&self, run: &TestRun) -> Result<usize, StoreError> {
        let mut entries = self.load_raw().await?;
        let entry =
            serde_json::to_value(run).map_err(|err| StoreError::Serialize { source: err })?;
        entries.push(entry);

        let content = serde_json::to_string_pretty(&entries)
            .map_err(|err| StoreError::Serialize { source: err })?;
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|err| StoreError::Write {
                path: self.path.clone(),
                source: err,
            })?;
        debug!(
            "Wrote {} runs to {}",
            entries.len(),
            self.path.display()
        );
        Ok(entries.len())
    }
}
