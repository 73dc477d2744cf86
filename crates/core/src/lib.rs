pub mod board;
pub mod cache;
pub mod config;
pub mod config_loader;
pub mod movement;
pub mod reference;
pub mod store;
pub mod tracker;
pub mod traits;

pub use board::{Board, Collection, RankedCollection};
pub use cache::BoardCache;
pub use config::{AppConfig, MarketplaceSettings, ServerConfig, TrackerSettings};
pub use config_loader::ConfigLoader;
pub use movement::{Movement, TrendColor, UNSEEN_RANK};
pub use reference::{DailyProvider, LastCycleProvider, ReferenceMode, ReferenceProvider};
pub use store::{ColorStore, HistoryStore, LastCycleStore, RankingSnapshot, StoreError};
pub use tracker::Tracker;
pub use traits::{BadgeRenderer, CollectionSource};
