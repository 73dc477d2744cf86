//! Seams to the upstream marketplace and the badge renderer.

use crate::board::{Collection, RankedCollection};
use anyhow::Result;
use async_trait::async_trait;

/// Source of the current ranked collection list.
#[async_trait]
pub trait CollectionSource: Send + Sync {
    /// Fetches up to `limit` collections ordered by 24h volume, best
    /// first.
    async fn fetch_top(&self, limit: usize) -> Result<Vec<Collection>>;
}

/// Renders the per-rank badge image for one board entry.
#[async_trait]
pub trait BadgeRenderer: Send + Sync {
    /// Renders and writes the badge for `entry`.
    async fn render(&self, entry: &RankedCollection) -> Result<()>;
}
