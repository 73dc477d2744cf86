//! Marketplace collections API integration for the NFT rank board.
//!
//! This crate provides:
//! - Rate-limited REST client for the paginated collections listing
//! - Continuation-token pagination up to the tracked rank count
//! - Bounded retry with exponential backoff per page
//! - Wire models converted to core records at the boundary
//!
//! # Example
//!
//! ```ignore
//! use rankboard_marketplace::{MarketplaceClient, MarketplaceConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = MarketplaceConfig::default().with_api_key("demo-key");
//!     let client = MarketplaceClient::new(config)?;
//!
//!     let top = client.top_collections(100).await?;
//!     println!("tracking {} collections", top.len());
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod models;

// Re-export main types for convenience
pub use client::{MarketplaceClient, MarketplaceConfig, MARKETPLACE_API_URL};
pub use error::MarketplaceError;
pub use models::{CollectionsPage, RawCollection};
