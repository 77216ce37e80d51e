use crate::constants::{LAT_MAX, LAT_MIN, LON_MAX, LON_MIN};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// A venue object for the map-rendering artifact. Empty fields are omitted
/// from the JSON entirely rather than serialized as empty strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapVenue {
    pub source: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    pub lat: f64,
    pub lon: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
}

/// Counts from one map-data conversion.
#[derive(Debug, Default)]
pub struct MapDataOutcome {
    pub converted: usize,
    pub skipped: usize,
    pub by_category: BTreeMap<String, usize>,
}

/// Parse one textual coordinate as it appears in the master table.
fn parse_coordinate(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn in_bounds(lat: f64, lon: f64) -> bool {
    lat > LAT_MIN && lat < LAT_MAX && lon > LON_MIN && lon < LON_MAX
}

/// Keep/drop verdict for a row's textual coordinates: drop when either is
/// missing, unparsable, non-finite, or the pair falls outside the fixed
/// regional bounding box.
pub fn geo_valid(lat: &str, lon: &str) -> Option<(f64, f64)> {
    let lat = parse_coordinate(lat)?;
    let lon = parse_coordinate(lon)?;
    in_bounds(lat, lon).then_some((lat, lon))
}

fn non_empty(field: Option<&str>) -> Option<String> {
    field
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// Convert the master table into the geo-filtered JSON array used for map
/// rendering. The filter runs only here: the master table itself retains
/// rows without usable coordinates.
pub fn convert_master_to_map_data(csv_path: &Path, json_path: &Path) -> Result<MapDataOutcome> {
    let mut reader = csv::Reader::from_path(csv_path)?;
    let headers = reader.headers()?.clone();
    let field = |record: &csv::StringRecord, name: &str| -> Option<String> {
        headers
            .iter()
            .position(|h| h == name)
            .and_then(|i| non_empty(record.get(i)))
    };

    let mut outcome = MapDataOutcome::default();
    let mut venues: Vec<MapVenue> = Vec::new();

    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping unreadable master row: {}", e);
                outcome.skipped += 1;
                continue;
            }
        };

        let lat_text = field(&record, "lat").unwrap_or_default();
        let lon_text = field(&record, "lon").unwrap_or_default();
        let (lat, lon) = match geo_valid(&lat_text, &lon_text) {
            Some(pair) => pair,
            None => {
                outcome.skipped += 1;
                continue;
            }
        };

        let category = field(&record, "category").unwrap_or_default();
        *outcome.by_category.entry(category.clone()).or_insert(0) += 1;

        venues.push(MapVenue {
            source: field(&record, "source").unwrap_or_default(),
            category,
            name: field(&record, "name"),
            brand: field(&record, "brand"),
            url: field(&record, "url"),
            postcode: field(&record, "postcode"),
            lat,
            lon,
            phone: field(&record, "phone"),
            rating: field(&record, "rating"),
            price_level: field(&record, "price_level"),
            business_status: field(&record, "business_status"),
            opening_hours: field(&record, "opening_hours"),
        });
        outcome.converted += 1;
    }

    fs::write(json_path, serde_json::to_string_pretty(&venues)?)?;
    info!(
        "Converted {} venues to {} ({} skipped without valid coordinates)",
        outcome.converted,
        json_path.display(),
        outcome.skipped
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_valid_inside_bounds() {
        assert_eq!(geo_valid("51.5", "-0.12"), Some((51.5, -0.12)));
    }

    #[test]
    fn test_geo_missing_is_dropped() {
        assert!(geo_valid("", "").is_none());
        assert!(geo_valid("51.5", "").is_none());
        assert!(geo_valid("", "-0.12").is_none());
    }

    #[test]
    fn test_geo_unparsable_is_dropped() {
        assert!(geo_valid("not-a-number", "-0.12").is_none());
        assert!(geo_valid("51.5", "east").is_none());
        assert!(geo_valid("inf", "-0.12").is_none());
        assert!(geo_valid("NaN", "-0.12").is_none());
    }

    #[test]
    fn test_geo_out_of_bounds_is_dropped() {
        assert!(geo_valid("60.0", "-0.12").is_none());
        assert!(geo_valid("51.5", "5.0").is_none());
        assert!(geo_valid("50.5", "-0.12").is_none()); // boundary excluded
    }

    #[test]
    fn test_convert_master_to_map_data() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("master.csv");
        let json_path = dir.path().join("venue_data.json");

        let csv = "\
source,category,name,brand,url,postcode,lat,lon,phone,rating,price_level,business_status,opening_hours
places,bowling,Rowans,,https://rowans.co.uk,N4 2DF,51.5646,-0.1063,,4.4,,,
search,bowling,Lanes of London,,,,,,,,,,
map,karting,Capital Karts,,,,60.0,-0.12,,,,,
";
        fs::write(&csv_path, csv).unwrap();

        let outcome = convert_master_to_map_data(&csv_path, &json_path).unwrap();
        assert_eq!(outcome.converted, 1);
        assert_eq!(outcome.skipped, 2);
        assert_eq!(outcome.by_category["bowling"], 1);

        let venues: Vec<MapVenue> =
            serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(venues.len(), 1);
        assert_eq!(venues[0].name.as_deref(), Some("Rowans"));

        // Empty fields are omitted from the artifact, not serialized empty
        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert!(raw[0].get("brand").is_none());
        assert!(raw[0].get("phone").is_none());
    }
}
