//! SVG rank-badge rendering for the NFT rank board.

pub mod badge;

pub use badge::SvgBadgeRenderer;
