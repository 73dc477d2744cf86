//! Wire types for the marketplace collections API.

use rankboard_core::Collection;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Display name used when the upstream omits one.
const UNKNOWN_NAME: &str = "Unknown";

/// One page of the paginated collections listing.
#[derive(Debug, Deserialize)]
pub struct CollectionsPage {
    /// Collections on this page, best volume first.
    #[serde(default)]
    pub collections: Vec<RawCollection>,

    /// Opaque cursor for the next page; absent on the last page.
    #[serde(default)]
    pub continuation: Option<String>,
}

/// Raw collection record from the API.
///
/// Every field except the identity is optional upstream; absent display
/// fields get defaults at conversion time.
#[derive(Debug, Deserialize)]
pub struct RawCollection {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "floorPrice")]
    pub floor_price: Option<f64>,
    #[serde(default, rename = "volume24h")]
    pub volume_24h: Option<f64>,
}

impl RawCollection {
    /// Converts to the core record.
    ///
    /// Returns `None` when the record carries no identity; callers skip
    /// such records rather than failing the page.
    #[must_use]
    pub fn into_collection(self) -> Option<Collection> {
        let id = match self.id {
            Some(id) if !id.is_empty() => id,
            _ => return None,
        };

        Some(Collection {
            id,
            name: self.name.unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            floor_price: decimal_or_zero(self.floor_price),
            volume_24h: decimal_or_zero(self.volume_24h),
        })
    }
}

fn decimal_or_zero(value: Option<f64>) -> Decimal {
    value
        .map(|v| Decimal::try_from(v).unwrap_or_default())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_full_record() {
        let json = r#"{
            "id": "0xabc",
            "name": "Pixel Apes",
            "floorPrice": 1.25,
            "volume24h": 340.5
        }"#;

        let raw: RawCollection = serde_json::from_str(json).unwrap();
        let collection = raw.into_collection().unwrap();

        assert_eq!(collection.id, "0xabc");
        assert_eq!(collection.name, "Pixel Apes");
        assert_eq!(collection.floor_price, dec!(1.25));
        assert_eq!(collection.volume_24h, dec!(340.5));
    }

    #[test]
    fn test_absent_fields_get_defaults() {
        let raw: RawCollection = serde_json::from_str(r#"{"id": "0xabc"}"#).unwrap();
        let collection = raw.into_collection().unwrap();

        assert_eq!(collection.name, "Unknown");
        assert_eq!(collection.floor_price, Decimal::ZERO);
        assert_eq!(collection.volume_24h, Decimal::ZERO);
    }

    #[test]
    fn test_record_without_id_is_dropped() {
        let raw: RawCollection = serde_json::from_str(r#"{"name": "No Identity"}"#).unwrap();
        assert!(raw.into_collection().is_none());

        let raw: RawCollection = serde_json::from_str(r#"{"id": ""}"#).unwrap();
        assert!(raw.into_collection().is_none());
    }

    #[test]
    fn test_parse_page_with_continuation() {
        let json = r#"{
            "collections": [{"id": "a"}, {"id": "b"}],
            "continuation": "cursor-123"
        }"#;

        let page: CollectionsPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.collections.len(), 2);
        assert_eq!(page.continuation.as_deref(), Some("cursor-123"));
    }

    #[test]
    fn test_parse_last_page_without_continuation() {
        let page: CollectionsPage =
            serde_json::from_str(r#"{"collections": [{"id": "a"}]}"#).unwrap();
        assert!(page.continuation.is_none());
    }
}
