use crate::constants;
use crate::error::Result;
use crate::types::{BaseVenue, RawItem};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// One per-category provider document loaded from the data directory.
#[derive(Debug, Clone)]
pub struct ProviderSnapshot {
    pub category: String,
    pub items: Vec<RawItem>,
}

/// Collect the snapshot files for one provider prefix, sorted by file name
/// so runs are deterministic.
fn snapshot_paths(data_dir: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(data_dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with(prefix) && name.ends_with(".json") {
            paths.push(entry.path());
        }
    }
    paths.sort();
    Ok(paths)
}

fn category_from_stem(file_name: &str, prefix: &str) -> Option<String> {
    file_name
        .strip_prefix(prefix)?
        .strip_suffix(".json")
        .map(|s| s.to_string())
}

fn load_snapshots(data_dir: &Path, prefix: &str, items_key: &str) -> Result<Vec<ProviderSnapshot>> {
    let mut snapshots = Vec::new();
    for path in snapshot_paths(data_dir, prefix)? {
        let raw = fs::read_to_string(&path)?;
        let doc: Value = match serde_json::from_str(&raw) {
            Ok(doc) => doc,
            Err(e) => {
                warn!("Skipping unreadable snapshot {}: {}", path.display(), e);
                continue;
            }
        };

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        // The document carries its own category tag; the file stem is the
        // fallback for older snapshots that predate the tag.
        let category = doc
            .get("category")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .or_else(|| category_from_stem(&file_name, prefix))
            .unwrap_or_default();

        let items = doc
            .get(items_key)
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();

        debug!(
            "Loaded snapshot {} ({} items, category {})",
            file_name,
            items.len(),
            category
        );
        snapshots.push(ProviderSnapshot { category, items });
    }
    Ok(snapshots)
}

pub fn load_search_snapshots(data_dir: &Path) -> Result<Vec<ProviderSnapshot>> {
    load_snapshots(data_dir, constants::SEARCH_SNAPSHOT_PREFIX, "results")
}

pub fn load_map_snapshots(data_dir: &Path) -> Result<Vec<ProviderSnapshot>> {
    load_snapshots(data_dir, constants::MAP_SNAPSHOT_PREFIX, "elements")
}

pub fn load_places_snapshots(data_dir: &Path) -> Result<Vec<ProviderSnapshot>> {
    load_snapshots(data_dir, constants::PLACES_SNAPSHOT_PREFIX, "places")
}

/// Build the enrichment pool: places entries that carry both a name and a
/// website. Entries without a website cannot be crawled and are left out.
pub fn base_venues(places: &[ProviderSnapshot]) -> Vec<BaseVenue> {
    let mut venues = Vec::new();
    for snapshot in places {
        for item in &snapshot.items {
            let name = item.get("name").and_then(|v| v.as_str()).unwrap_or("");
            let website = item.get("website").and_then(|v| v.as_str()).unwrap_or("");
            if name.is_empty() || website.is_empty() {
                continue;
            }
            venues.push(BaseVenue {
                name: name.to_string(),
                category: snapshot.category.clone(),
                website: website.to_string(),
                address: item
                    .get("address")
                    .and_then(|v| v.as_str())
                    .unwrap_or("")
                    .to_string(),
                postcode: item
                    .get("postcode")
                    .and_then(|v| v.as_str())
                    .unwrap_or("")
                    .to_string(),
                rating: item.get("rating").and_then(|v| v.as_f64()),
                phone: item
                    .get("phone")
                    .and_then(|v| v.as_str())
                    .filter(|s| !s.is_empty())
                    .map(|s| s.to_string()),
            });
        }
    }
    venues
}
