//! HTTP surface for the NFT rank board: per-rank token metadata and the
//! rendered badge images.

pub mod handlers;
pub mod server;

pub use handlers::{AppState, Attribute, TokenMetadata};
pub use server::ApiServer;
