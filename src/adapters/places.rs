use super::{blank_row, coordinate_pair, non_empty_str, ProviderAdapter};
use crate::error::{AggregatorError, Result};
use crate::types::{RawItem, Source, VenueRow};
use serde_json::Value;

/// Adapter for business-directory (places) records, the richest of the
/// three providers: ratings, price levels, status, and opening hours.
pub struct PlacesAdapter;

impl PlacesAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Price levels arrive as enum strings from the directory API; older
    /// snapshots carry bare numbers. Both render as text.
    fn scalar_string(item: &RawItem, key: &str) -> Option<String> {
        match item.get(key) {
            Some(Value::String(s)) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl Default for PlacesAdapter {
    fn default() -> Self {
        Self::new()
    }
}

/// Flatten a sequence of per-day hour strings into one semicolon-joined
/// string. An empty sequence yields an empty string, not null.
pub fn flatten_opening_hours(hours: &[Value]) -> String {
    hours
        .iter()
        .filter_map(|v| v.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ProviderAdapter for PlacesAdapter {
    fn source(&self) -> Source {
        Source::Places
    }

    fn adapt(&self, category: &str, item: &RawItem) -> Result<VenueRow> {
        if !item.is_object() {
            return Err(AggregatorError::MalformedRecord(
                "places record is not an object".to_string(),
            ));
        }

        let (lat, lon) = coordinate_pair(
            item.get("lat").and_then(|v| v.as_f64()),
            item.get("lon").and_then(|v| v.as_f64()),
        );

        let hours = item
            .get("opening_hours")
            .and_then(|v| v.as_array())
            .map(|days| flatten_opening_hours(days))
            .unwrap_or_default();

        Ok(VenueRow {
            name: non_empty_str(item, "name"),
            url: non_empty_str(item, "website"),
            postcode: non_empty_str(item, "postcode"),
            lat,
            lon,
            phone: non_empty_str(item, "phone"),
            rating: item.get("rating").and_then(|v| v.as_f64()),
            price_level: Self::scalar_string(item, "price_level"),
            business_status: non_empty_str(item, "business_status"),
            opening_hours: (!hours.is_empty()).then_some(hours),
            ..blank_row(self.source(), category)
        })
    }
}
