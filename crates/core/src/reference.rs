//! Pluggable reference state for movement classification.
//!
//! The tracker computes movement against "where was this collection
//! before", where *before* is either the immediately preceding cycle or
//! the snapshot nearest to 24 hours ago. Both shapes sit behind one
//! provider interface so the engine itself stays variant-free.

use crate::store::{
    find_reference, prune, HistoryStore, LastCycleStore, RankingSnapshot, StoreError,
    LOOKBACK_SECS,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Which reference shape the tracker runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceMode {
    /// Compare against the immediately preceding cycle.
    LastCycle,
    /// Compare against the snapshot nearest to 24 hours ago.
    Daily,
}

impl ReferenceMode {
    /// Builds the provider for this mode with its store rooted under
    /// `data_dir`.
    #[must_use]
    pub fn provider(self, data_dir: &Path) -> Box<dyn ReferenceProvider> {
        match self {
            Self::LastCycle => Box::new(LastCycleProvider::new(LastCycleStore::new(
                data_dir.join("rankings.json"),
            ))),
            Self::Daily => Box::new(DailyProvider::new(HistoryStore::new(
                data_dir.join("ranking_history.json"),
            ))),
        }
    }
}

/// Supplies the reference ranks for a cycle and records the cycle's
/// outcome.
pub trait ReferenceProvider: Send {
    /// Reference ranks for a cycle starting at `now` (epoch seconds).
    /// Empty when no usable reference exists.
    fn reference(&mut self, now: i64) -> HashMap<String, u32>;

    /// Records the completed cycle's ranks.
    ///
    /// # Errors
    /// Returns an error if persisting the state fails; in that case the
    /// previously persisted state is left intact.
    fn commit(&mut self, now: i64, ranks: &HashMap<String, u32>) -> Result<(), StoreError>;
}

/// Last-cycle reference: the persisted mapping is overwritten wholesale
/// each cycle.
#[derive(Debug)]
pub struct LastCycleProvider {
    store: LastCycleStore,
}

impl LastCycleProvider {
    /// Creates a provider over the given store.
    #[must_use]
    pub fn new(store: LastCycleStore) -> Self {
        Self { store }
    }
}

impl ReferenceProvider for LastCycleProvider {
    fn reference(&mut self, _now: i64) -> HashMap<String, u32> {
        self.store.load()
    }

    fn commit(&mut self, _now: i64, ranks: &HashMap<String, u32>) -> Result<(), StoreError> {
        self.store.save(ranks)
    }
}

/// 24-hour-lookback reference over the pruned snapshot history.
///
/// The history is loaded once at construction and kept in memory between
/// cycles; every commit appends the new snapshot, prunes the window, and
/// re-saves the whole sequence.
#[derive(Debug)]
pub struct DailyProvider {
    store: HistoryStore,
    history: Vec<RankingSnapshot>,
}

impl DailyProvider {
    /// Creates a provider over the given store, loading any persisted
    /// history eagerly.
    #[must_use]
    pub fn new(store: HistoryStore) -> Self {
        let history = store.load();
        Self { store, history }
    }
}

impl ReferenceProvider for DailyProvider {
    fn reference(&mut self, now: i64) -> HashMap<String, u32> {
        find_reference(&self.history, now - LOOKBACK_SECS)
            .cloned()
            .unwrap_or_default()
    }

    fn commit(&mut self, now: i64, ranks: &HashMap<String, u32>) -> Result<(), StoreError> {
        let mut next = std::mem::take(&mut self.history);
        next.push(RankingSnapshot {
            timestamp: now,
            rankings: ranks.clone(),
        });
        let next = prune(next, now);

        let result = self.store.save(&next);
        self.history = next;
        result
    }
}
