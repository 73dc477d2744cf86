//! Update-cycle orchestrator.
//!
//! One tracker task owns every writer in the system: the reference
//! provider, the color ledger, the badge directory, and the board cache.
//! Cycles run inline on that task, so two cycles can never overlap, and
//! a cycle either persists and publishes everything or aborts leaving
//! prior state untouched.

use crate::board::{Board, RankedCollection};
use crate::cache::BoardCache;
use crate::movement::{Movement, TrendColor};
use crate::reference::ReferenceProvider;
use crate::store::ColorStore;
use crate::traits::{BadgeRenderer, CollectionSource};
use anyhow::{bail, Context, Result};
use chrono::Utc;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

/// Default number of tracked ranks.
pub const DEFAULT_TOP_N: usize = 100;

/// Default upper bound on a single cycle, fetch and rendering included.
pub const DEFAULT_CYCLE_TIMEOUT: Duration = Duration::from_secs(120);

/// Periodic update-cycle driver.
pub struct Tracker<S, R>
where
    S: CollectionSource,
    R: BadgeRenderer,
{
    source: S,
    renderer: R,
    reference: Box<dyn ReferenceProvider>,
    colors: ColorStore,
    cache: BoardCache,
    top_n: usize,
    cycle_timeout: Duration,
}

impl<S, R> Tracker<S, R>
where
    S: CollectionSource,
    R: BadgeRenderer,
{
    /// Creates a tracker over the given collaborators.
    #[must_use]
    pub fn new(
        source: S,
        renderer: R,
        reference: Box<dyn ReferenceProvider>,
        colors: ColorStore,
        cache: BoardCache,
    ) -> Self {
        Self {
            source,
            renderer,
            reference,
            colors,
            cache,
            top_n: DEFAULT_TOP_N,
            cycle_timeout: DEFAULT_CYCLE_TIMEOUT,
        }
    }

    /// Sets the number of tracked ranks.
    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Sets the per-cycle timeout.
    #[must_use]
    pub fn with_cycle_timeout(mut self, timeout: Duration) -> Self {
        self.cycle_timeout = timeout;
        self
    }

    /// Runs one update cycle end to end.
    ///
    /// Returns the number of ranked entries published. On any error the
    /// persisted state, previously rendered badges, and the published
    /// board are left exactly as they were.
    ///
    /// # Errors
    /// Returns an error when the upstream fetch fails or yields nothing,
    /// or when persisting the cycle's state fails.
    pub async fn run_cycle(&mut self) -> Result<usize> {
        let started = Utc::now();
        let now = started.timestamp();

        let collections = self
            .source
            .fetch_top(self.top_n)
            .await
            .context("fetching top collections")?;
        if collections.is_empty() {
            bail!("upstream returned no collections");
        }

        let reference = self.reference.reference(now);
        let previous_colors = self.colors.load();

        let mut entries = Vec::with_capacity(collections.len().min(self.top_n));
        let mut ranks = HashMap::new();
        let mut colors = HashMap::new();

        for (i, collection) in collections.into_iter().take(self.top_n).enumerate() {
            let rank = i as u32 + 1;
            let movement = Movement::classify(rank, reference.get(&collection.id).copied());
            let color = TrendColor::resolve(movement, previous_colors.get(&collection.id).copied());

            ranks.insert(collection.id.clone(), rank);
            colors.insert(collection.id.clone(), color);
            entries.push(RankedCollection {
                rank,
                collection,
                movement,
                color,
            });
        }

        // Persist before touching badge files so a failed commit leaves
        // every output of the previous cycle in place.
        self.reference
            .commit(now, &ranks)
            .context("persisting reference state")?;
        self.colors
            .save(&colors)
            .context("persisting trend colors")?;

        for entry in &entries {
            if let Err(e) = self.renderer.render(entry).await {
                warn!(
                    rank = entry.rank,
                    collection = %entry.collection.id,
                    error = %e,
                    "Badge render failed, keeping previous image"
                );
            }
        }

        let count = entries.len();
        self.cache
            .publish(Board {
                updated_at: started,
                entries,
            })
            .await;

        info!(collections = count, "Update cycle complete");
        Ok(count)
    }

    /// Runs an immediate first cycle and then one cycle per tick.
    ///
    /// Cycles execute inline on this task: a cycle that outlives the
    /// interval delays the next tick instead of overlapping it, and
    /// missed ticks are skipped rather than bursting afterwards. Each
    /// cycle runs under the configured timeout so a stuck upstream
    /// cannot starve the loop. Failures are logged and the loop keeps
    /// going.
    pub async fn run(&mut self, every: Duration) -> Result<()> {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let cycle_timeout = self.cycle_timeout;

        loop {
            ticker.tick().await;

            match tokio::time::timeout(cycle_timeout, self.run_cycle()).await {
                Ok(Ok(_)) => {}
                Ok(Err(e)) => {
                    error!(error = %e, "Update cycle failed, keeping previous board");
                }
                Err(_) => {
                    error!(
                        timeout_secs = cycle_timeout.as_secs(),
                        "Update cycle timed out, keeping previous board"
                    );
                }
            }
        }
    }
}
