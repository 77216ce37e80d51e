pub mod map;
pub mod places;
pub mod search;

pub use map::MapAdapter;
pub use places::PlacesAdapter;
pub use search::SearchAdapter;

use crate::error::Result;
use crate::types::{RawItem, Source, VenueRow};

/// Maps one provider's raw item shape onto the canonical venue row.
///
/// Adapters never infer `category` from content; the caller supplies the
/// grouping the snapshot represents. Unknown or missing fields become
/// `None`. Only an item with no usable shape at all is an error, and the
/// caller recovers by skipping that single item.
pub trait ProviderAdapter: Send + Sync {
    /// Provenance tag stamped on every row this adapter produces
    fn source(&self) -> Source;

    /// Adapt one raw item into exactly one canonical row
    fn adapt(&self, category: &str, item: &RawItem) -> Result<VenueRow>;
}

/// An empty row pre-stamped with source and category, for adapters to fill.
pub(crate) fn blank_row(source: Source, category: &str) -> VenueRow {
    VenueRow {
        source,
        category: category.to_string(),
        name: None,
        brand: None,
        url: None,
        postcode: None,
        lat: None,
        lon: None,
        phone: None,
        rating: None,
        price_level: None,
        business_status: None,
        opening_hours: None,
    }
}

/// Read a string field, treating whitespace-only values as absent.
pub(crate) fn non_empty_str(item: &RawItem, key: &str) -> Option<String> {
    item.get(key)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// Coordinates are only meaningful as a pair; a lone latitude or longitude
/// is treated as no geo data at all.
pub(crate) fn coordinate_pair(lat: Option<f64>, lon: Option<f64>) -> (Option<f64>, Option<f64>) {
    match (lat, lon) {
        (Some(lat), Some(lon)) => (Some(lat), Some(lon)),
        _ => (None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_pair_requires_both() {
        assert_eq!(coordinate_pair(Some(51.5), Some(-0.1)), (Some(51.5), Some(-0.1)));
        assert_eq!(coordinate_pair(Some(51.5), None), (None, None));
        assert_eq!(coordinate_pair(None, Some(-0.1)), (None, None));
        assert_eq!(coordinate_pair(None, None), (None, None));
    }

    #[test]
    fn test_non_empty_str_trims_and_filters() {
        let item = serde_json::json!({"a": "  x ", "b": "   ", "c": 7});
        assert_eq!(non_empty_str(&item, "a"), Some("x".to_string()));
        assert_eq!(non_empty_str(&item, "b"), None);
        assert_eq!(non_empty_str(&item, "c"), None);
        assert_eq!(non_empty_str(&item, "missing"), None);
    }
}
