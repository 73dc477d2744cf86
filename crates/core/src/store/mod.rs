//! JSON-file persistence for ranking state.
//!
//! All stores share the same semantics: a missing or unreadable file
//! loads as empty state (first run and recovery from corruption are
//! normal outcomes, not errors), and saves replace the whole file via a
//! temp file and rename so a crash or a concurrent reader never sees a
//! partial document.

mod colors;
mod history;
mod last_cycle;

pub use colors::ColorStore;
pub use history::{
    find_reference, prune, HistoryStore, RankingSnapshot, LOOKBACK_SECS, RETENTION_SECS,
    TOLERANCE_SECS,
};
pub use last_cycle::LastCycleStore;

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors from store save operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error writing the file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serializes `value` and replaces `path` with it in one rename.
pub(crate) fn write_json_atomic<T: serde::Serialize>(
    path: &Path,
    value: &T,
) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, serde_json::to_vec_pretty(value)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Reads and deserializes `path`; `None` when missing or unreadable.
pub(crate) fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Option<T> {
    if !path.exists() {
        tracing::info!(
            path = %path.display(),
            "No persisted state file found, starting fresh"
        );
        return None;
    }

    let parsed = fs::read(path)
        .map_err(StoreError::from)
        .and_then(|bytes| Ok(serde_json::from_slice(&bytes)?));

    match parsed {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to load persisted state, starting fresh"
            );
            None
        }
    }
}
