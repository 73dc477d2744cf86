//! Shared handle to the latest completed board.

use crate::board::Board;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared, atomically swapped handle to the latest completed [`Board`].
///
/// The tracker publishes a whole board at the end of a successful cycle;
/// readers clone the inner [`Arc`] out and keep a consistent snapshot for
/// as long as they need it. Nothing is mutated in place, so a reader
/// never observes entries from two different cycles.
#[derive(Debug, Clone, Default)]
pub struct BoardCache {
    inner: Arc<RwLock<Option<Arc<Board>>>>,
}

impl BoardCache {
    /// Creates an empty cache; [`BoardCache::latest`] returns `None`
    /// until the first cycle publishes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the published board with this cycle's result.
    pub async fn publish(&self, board: Board) {
        *self.inner.write().await = Some(Arc::new(board));
    }

    /// Returns the latest published board, if any cycle has completed.
    pub async fn latest(&self) -> Option<Arc<Board>> {
        self.inner.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_empty_until_first_publish() {
        let cache = BoardCache::new();
        assert!(cache.latest().await.is_none());
    }

    #[tokio::test]
    async fn test_publish_swaps_whole_board() {
        let cache = BoardCache::new();

        cache
            .publish(Board {
                updated_at: Utc::now(),
                entries: vec![],
            })
            .await;
        let first = cache.latest().await.unwrap();

        cache
            .publish(Board {
                updated_at: Utc::now(),
                entries: vec![],
            })
            .await;
        let second = cache.latest().await.unwrap();

        // A held snapshot stays valid after a new publish.
        assert!(!Arc::ptr_eq(&first, &second));
        assert!(second.updated_at >= first.updated_at);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let cache = BoardCache::new();
        let reader = cache.clone();

        cache
            .publish(Board {
                updated_at: Utc::now(),
                entries: vec![],
            })
            .await;

        assert!(reader.latest().await.is_some());
    }
}
