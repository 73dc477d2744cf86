use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use rankboard_core::{BoardCache, RankedCollection};
use serde::Serialize;
use std::sync::Arc;

/// Shared state for request handlers.
pub struct AppState {
    /// Latest completed board, published by the tracker.
    pub cache: BoardCache,
    /// Base URL clients reach this server at; used to build image URLs.
    pub public_base_url: String,
}

/// ERC-721 style token metadata document.
#[derive(Debug, Serialize)]
pub struct TokenMetadata {
    pub name: String,
    pub description: String,
    pub image: String,
    pub attributes: Vec<Attribute>,
}

/// One trait entry in the metadata attributes list.
#[derive(Debug, Serialize)]
pub struct Attribute {
    pub trait_type: String,
    pub value: serde_json::Value,
}

impl Attribute {
    fn new(trait_type: &str, value: impl Into<serde_json::Value>) -> Self {
        Self {
            trait_type: trait_type.to_string(),
            value: value.into(),
        }
    }
}

impl TokenMetadata {
    /// Builds the metadata document for one board entry.
    #[must_use]
    pub fn for_entry(entry: &RankedCollection, public_base_url: &str) -> Self {
        let rank = entry.rank;

        Self {
            name: format!("Volume Top 100 #{rank}"),
            description: format!(
                "Live badge for the #{rank} NFT collection by 24h trading volume. \
                 The card updates as the leaderboard moves."
            ),
            image: format!("{public_base_url}/images/{rank}.svg"),
            attributes: vec![
                Attribute::new("Rank", rank),
                Attribute::new("Collection", entry.collection.name.clone()),
                Attribute::new(
                    "Floor Price",
                    entry.collection.floor_price.normalize().to_string(),
                ),
                Attribute::new(
                    "24h Volume",
                    entry.collection.volume_24h.normalize().to_string(),
                ),
                Attribute::new("Trend", entry.movement.as_str()),
            ],
        }
    }
}

/// Serves the metadata document for a rank.
///
/// # Errors
/// Returns `StatusCode::NOT_FOUND` when no cycle has completed yet or
/// the rank is outside the current board.
pub async fn token_metadata(
    State(state): State<Arc<AppState>>,
    Path(rank): Path<u32>,
) -> Result<Json<TokenMetadata>, StatusCode> {
    let board = state.cache.latest().await.ok_or(StatusCode::NOT_FOUND)?;
    let entry = board.by_rank(rank).ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(TokenMetadata::for_entry(entry, &state.public_base_url)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rankboard_core::{Collection, Movement, TrendColor};
    use rust_decimal_macros::dec;

    #[test]
    fn test_metadata_document_shape() {
        let entry = RankedCollection {
            rank: 7,
            collection: Collection {
                id: "0xabc".to_string(),
                name: "Pixel Apes".to_string(),
                floor_price: dec!(1.250),
                volume_24h: dec!(340.50),
            },
            movement: Movement::Up,
            color: TrendColor::Green,
        };

        let metadata = TokenMetadata::for_entry(&entry, "http://localhost:8080");

        assert_eq!(metadata.name, "Volume Top 100 #7");
        assert_eq!(metadata.image, "http://localhost:8080/images/7.svg");
        assert_eq!(metadata.attributes.len(), 5);

        let json = serde_json::to_value(&metadata).unwrap();
        let attributes = json["attributes"].as_array().unwrap();
        assert_eq!(attributes[0]["trait_type"], "Rank");
        assert_eq!(attributes[0]["value"], 7);
        assert_eq!(attributes[1]["value"], "Pixel Apes");
        assert_eq!(attributes[2]["value"], "1.25");
        assert_eq!(attributes[3]["value"], "340.5");
        assert_eq!(attributes[4]["value"], "up");
    }
}
