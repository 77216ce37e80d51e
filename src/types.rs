use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw provider item as found in a snapshot document
pub type RawItem = serde_json::Value;

/// Which provider a canonical row came from. Set once at adaptation time
/// and never altered afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Search,
    Map,
    Places,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Search => crate::constants::SEARCH_SOURCE,
            Source::Map => crate::constants::MAP_SOURCE,
            Source::Places => crate::constants::PLACES_SOURCE,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The unified venue record every provider adapter must produce.
///
/// Field order matches the master CSV column order. Absent fields are
/// `None` (an empty CSV cell), never a placeholder string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueRow {
    pub source: Source,
    pub category: String,
    pub name: Option<String>,
    pub brand: Option<String>,
    pub url: Option<String>,
    pub postcode: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub phone: Option<String>,
    pub rating: Option<f64>,
    pub price_level: Option<String>,
    pub business_status: Option<String>,
    pub opening_hours: Option<String>,
}

/// Base fields for a venue eligible for enrichment. Drawn from the places
/// provider, which is the only one that reliably carries a website.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseVenue {
    pub name: String,
    pub category: String,
    pub website: String,
    pub address: String,
    pub postcode: String,
    pub rating: Option<f64>,
    pub phone: Option<String>,
}
