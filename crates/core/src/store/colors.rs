//! Sticky trend-color ledger.

use super::{read_json, write_json_atomic, StoreError};
use crate::movement::TrendColor;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

/// Persists the sticky color assigned to each collection id.
///
/// Losing this file only resets colors to the no-history default; it
/// never affects movement computation.
#[derive(Debug, Clone)]
pub struct ColorStore {
    path: PathBuf,
}

impl ColorStore {
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

    /// Loads the recorded colors; missing or corrupt files load empty.
    #[must_use]
    pub fn load(&self) -> HashMap<String, TrendColor> {
        read_json(&self.path).unwrap_or_default()
    }

    /// Overwrites the recorded colors with this cycle's assignments.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save(&self, colors: &HashMap<String, TrendColor>) -> Result<(), StoreError> {
        write_json_atomic(&self.path, colors)?;
        debug!(
            path = %self.path.display(),
            entries = colors.len(),
            "Saved trend colors"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = ColorStore::new(dir.path().join("colors.json"));

        let mut colors = HashMap::new();
        colors.insert("a".to_string(), TrendColor::Green);
        colors.insert("b".to_string(), TrendColor::Red);
        store.save(&colors).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.get("a"), Some(&TrendColor::Green));
        assert_eq!(loaded.get("b"), Some(&TrendColor::Red));
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = ColorStore::new(dir.path().join("colors.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_colors_persist_as_lowercase_names() {
        let dir = TempDir::new().unwrap();
        let store = ColorStore::new(dir.path().join("colors.json"));

        let mut colors = HashMap::new();
        colors.insert("a".to_string(), TrendColor::Green);
        store.save(&colors).unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"green\""));
    }
}
