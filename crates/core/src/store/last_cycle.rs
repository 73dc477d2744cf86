//! Previous-cycle rank mapping store.

use super::{read_json, write_json_atomic, StoreError};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

/// Persists the id → rank mapping of the most recently completed cycle.
///
/// The mapping is overwritten wholesale each cycle; after a successful
/// [`LastCycleStore::save`] the file reflects exactly one cycle, never a
/// mix of two.
#[derive(Debug, Clone)]
pub struct LastCycleStore {
    path: PathBuf,
}

impl LastCycleStore {
    /// Creates a store backed by `path`.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Loads the previous cycle's ranks.
    ///
    /// A missing or corrupt file is the first-run case and loads as an
    /// empty mapping.
    #[must_use]
    pub fn load(&self) -> HashMap<String, u32> {
        read_json(&self.path).unwrap_or_default()
    }

    /// Overwrites the persisted mapping with this cycle's ranks.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save(&self, ranks: &HashMap<String, u32>) -> Result<(), StoreError> {
        write_json_atomic(&self.path, ranks)?;
        debug!(
            path = %self.path.display(),
            entries = ranks.len(),
            "Saved last-cycle rankings"
        );
        Ok(())
    }
}
