//! Rolling history of timestamped ranking snapshots.
//!
//! The 24-hour-lookback variant keeps one snapshot per cycle and answers
//! "where was this collection a day ago" by nearest-timestamp match. The
//! history is pruned on every commit so it never grows past the lookback
//! window plus slack.

use super::{read_json, write_json_atomic, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

/// How far back a cycle looks for its reference snapshot.
pub const LOOKBACK_SECS: i64 = 24 * 3600;

/// Maximum distance between the target time and a usable snapshot.
pub const TOLERANCE_SECS: i64 = 3600;

/// Snapshots older than this are pruned. Keeps the full lookback window
/// plus the tolerance available for the next cycle.
pub const RETENTION_SECS: i64 = 25 * 3600;

/// The full id → rank mapping captured at one update cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingSnapshot {
    /// Cycle start, epoch seconds.
    pub timestamp: i64,
    /// Rank per collection id at that cycle.
    pub rankings: HashMap<String, u32>,
}

/// Selects the snapshot closest to `target`, within tolerance.
///
/// Returns `None` when the history is empty or when even the nearest
/// snapshot is more than [`TOLERANCE_SECS`] away. When two snapshots are
/// equidistant the older one wins; `history` is expected oldest-first, as
/// [`HistoryStore::load`] produces it.
#[must_use]
pub fn find_reference(history: &[RankingSnapshot], target: i64) -> Option<&HashMap<String, u32>> {
    let nearest = history.iter().min_by_key(|s| (s.timestamp - target).abs())?;

    if (nearest.timestamp - target).abs() <= TOLERANCE_SECS {
        Some(&nearest.rankings)
    } else {
        None
    }
}

/// Drops every snapshot with `timestamp < now - RETENTION_SECS`.
#[must_use]
pub fn prune(history: Vec<RankingSnapshot>, now: i64) -> Vec<RankingSnapshot> {
    let cutoff = now - RETENTION_SECS;
    history.into_iter().filter(|s| s.timestamp >= cutoff).collect()
}

/// Persists the pruned snapshot sequence.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
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

    /// Loads the snapshot history, oldest first.
    ///
    /// Snapshots are sorted by timestamp on load so nearest-match scans
    /// are deterministic regardless of on-disk order. Missing or corrupt
    /// files load as an empty history.
    #[must_use]
    pub fn load(&self) -> Vec<RankingSnapshot> {
        let mut history: Vec<RankingSnapshot> = read_json(&self.path).unwrap_or_default();
        history.sort_by_key(|s| s.timestamp);
        history
    }

    /// Persists the snapshot sequence.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save(&self, history: &[RankingSnapshot]) -> Result<(), StoreError> {
        write_json_atomic(&self.path, &history)?;
        debug!(
            path = %self.path.display(),
            snapshots = history.len(),
            "Saved ranking history"
        );
        Ok(())
    }
}
