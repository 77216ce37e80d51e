/// Fixed pipeline constants shared across modules.

// Provider tags in the order providers are merged
pub const SEARCH_SOURCE: &str = "search";
pub const MAP_SOURCE: &str = "map";
pub const PLACES_SOURCE: &str = "places";

// Snapshot file prefixes per provider (e.g. data/places_bowling.json)
pub const SEARCH_SNAPSHOT_PREFIX: &str = "search_";
pub const MAP_SNAPSHOT_PREFIX: &str = "map_";
pub const PLACES_SNAPSHOT_PREFIX: &str = "places_";

// Bounding box for coordinate sanity checks, Greater London deployment.
// Values outside these strict bounds are treated as bad geo data.
pub const LAT_MIN: f64 = 50.5;
pub const LAT_MAX: f64 = 52.0;
pub const LON_MIN: f64 = -1.0;
pub const LON_MAX: f64 = 1.0;

// Extraction thresholds
pub const MIN_MATCH_LEN: usize = 3;
pub const MAX_PRICING_ITEMS: usize = 10;
pub const CONTENT_SUMMARY_CHARS: usize = 800;

// Enrichment batch controls
pub const DEFAULT_SAMPLE_SIZE: usize = 15;
pub const CRAWL_DELAY_MS: u64 = 300;

// Summary report sizes
pub const TOP_ATTRACTIONS: usize = 25;
pub const TOP_SPECIAL_FEATURES: usize = 10;

/// Default artifact names
pub const MASTER_CSV_NAME: &str = "london_lbe_master.csv";
pub const MAP_DATA_NAME: &str = "venue_data.json";
pub const ENRICHMENT_SUMMARY_NAME: &str = "enrichment_summary.json";
