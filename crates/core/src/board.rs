//! Value types for the ranked collection board.

use crate::movement::{Movement, TrendColor};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One collection as fetched from the marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Stable upstream identifier.
    pub id: String,
    /// Display name; `"Unknown"` when the upstream omits it.
    pub name: String,
    /// Floor price in the marketplace's native currency.
    pub floor_price: Decimal,
    /// Trading volume over the trailing 24 hours.
    pub volume_24h: Decimal,
}

/// A collection together with its rank and movement for one cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCollection {
    /// 1-based position by 24h volume.
    pub rank: u32,
    /// The underlying collection record.
    pub collection: Collection,
    /// Rank change relative to the reference state.
    pub movement: Movement,
    /// Sticky trend color after this cycle.
    pub color: TrendColor,
}

/// The complete result set of one update cycle.
///
/// Boards are immutable once built; the serving layer receives whole
/// boards through [`BoardCache`](crate::cache::BoardCache) and never a
/// partially updated one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    /// When the cycle that produced this board started.
    pub updated_at: DateTime<Utc>,
    /// Entries ordered by rank, densely `1..=len`.
    pub entries: Vec<RankedCollection>,
}

impl Board {
    /// Looks up an entry by its 1-based rank.
    #[must_use]
    pub fn by_rank(&self, rank: u32) -> Option<&RankedCollection> {
        if rank == 0 {
            return None;
        }
        self.entries.get(rank as usize - 1)
    }

    /// Number of ranked entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the board holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
