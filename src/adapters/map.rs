use super::{blank_row, coordinate_pair, non_empty_str, ProviderAdapter};
use crate::error::{AggregatorError, Result};
use crate::types::{RawItem, Source, VenueRow};

/// Adapter for map-database features. Point features carry `lat`/`lon`
/// directly; area features carry them under a nested `center` object.
pub struct MapAdapter;

impl MapAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Prefer the direct point field, fall back to the feature's center.
    fn coordinate(item: &RawItem, key: &str) -> Option<f64> {
        item.get(key)
            .and_then(|v| v.as_f64())
            .or_else(|| item.get("center").and_then(|c| c.get(key)).and_then(|v| v.as_f64()))
    }
}

impl Default for MapAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderAdapter for MapAdapter {
    fn source(&self) -> Source {
        Source::Map
    }

    fn adapt(&self, category: &str, item: &RawItem) -> Result<VenueRow> {
        if !item.is_object() {
            return Err(AggregatorError::MalformedRecord(
                "map feature is not an object".to_string(),
            ));
        }

        let (lat, lon) = coordinate_pair(
            Self::coordinate(item, "lat"),
            Self::coordinate(item, "lon"),
        );

        Ok(VenueRow {
            name: non_empty_str(item, "name"),
            brand: non_empty_str(item, "brand"),
            url: non_empty_str(item, "website"),
            postcode: non_empty_str(item, "postcode"),
            lat,
            lon,
            ..blank_row(self.source(), category)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_adapt_point_feature() {
        let item = json!({
            "name": "Queens Skate Dine Bowl",
            "brand": "Queens",
            "website": "https://queens.london",
            "postcode": "W2 4QP",
            "lat": 51.5107,
            "lon": -0.1872
        });

        let row = MapAdapter::new().adapt("bowling", &item).unwrap();
        assert_eq!(row.source, Source::Map);
        assert_eq!(row.category, "bowling");
        assert_eq!(row.name.as_deref(), Some("Queens Skate Dine Bowl"));
        assert_eq!(row.brand.as_deref(), Some("Queens"));
        assert_eq!(row.lat, Some(51.5107));
        assert_eq!(row.lon, Some(-0.1872));
    }

    #[test]
    fn test_area_feature_falls_back_to_center() {
        let item = json!({
            "name": "Paintball Woods",
            "center": {"lat": 51.48, "lon": 0.02}
        });

        let row = MapAdapter::new().adapt("paintball", &item).unwrap();
        assert_eq!(row.lat, Some(51.48));
        assert_eq!(row.lon, Some(0.02));
    }

    #[test]
    fn test_point_field_wins_over_center() {
        let item = json!({
            "name": "Lane 7",
            "lat": 51.52,
            "lon": -0.08,
            "center": {"lat": 0.0, "lon": 0.0}
        });

        let row = MapAdapter::new().adapt("bowling", &item).unwrap();
        assert_eq!(row.lat, Some(51.52));
        assert_eq!(row.lon, Some(-0.08));
    }

    #[test]
    fn test_lone_coordinate_becomes_absent() {
        let item = json!({"name": "Half Mapped", "lat": 51.5});
        let row = MapAdapter::new().adapt("climbing", &item).unwrap();
        assert!(row.lat.is_none());
        assert!(row.lon.is_none());
    }

    #[test]
    fn test_missing_fields_stay_absent() {
        let item = json!({"name": "Bare Feature"});
        let row = MapAdapter::new().adapt("laser_tag", &item).unwrap();
        assert!(row.brand.is_none());
        assert!(row.url.is_none());
        assert!(row.postcode.is_none());
        assert!(row.phone.is_none());
    }

    #[test]
    fn test_non_object_is_malformed() {
        assert!(MapAdapter::new().adapt("bowling", &json!(42)).is_err());
    }
}
