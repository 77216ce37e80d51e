use crate::adapters::{MapAdapter, PlacesAdapter, ProviderAdapter, SearchAdapter};
use crate::error::Result;
use crate::snapshots::ProviderSnapshot;
use crate::types::VenueRow;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

/// Outcome of merging all providers' snapshots into one row set.
#[derive(Debug, Default)]
pub struct MergeOutcome {
    pub rows: Vec<VenueRow>,
    /// Malformed items dropped during adaptation, across all providers
    pub skipped: usize,
}

/// Per-source and per-category row counts for the run summary.
#[derive(Debug, Default)]
pub struct MergeSummary {
    pub by_source: BTreeMap<String, usize>,
    pub by_category: BTreeMap<String, usize>,
}

fn adapt_snapshots(
    adapter: &dyn ProviderAdapter,
    snapshots: &[ProviderSnapshot],
    outcome: &mut MergeOutcome,
) {
    for snapshot in snapshots {
        let mut adapted = 0usize;
        for item in &snapshot.items {
            match adapter.adapt(&snapshot.category, item) {
                Ok(row) => {
                    outcome.rows.push(row);
                    adapted += 1;
                }
                Err(e) => {
                    warn!(
                        "Skipping malformed {} item in category {}: {}",
                        adapter.source(),
                        snapshot.category,
                        e
                    );
                    outcome.skipped += 1;
                }
            }
        }
        info!(
            "Adapted {} {} rows for category {}",
            adapted,
            adapter.source(),
            snapshot.category
        );
    }
}

/// Concatenate all three providers' rows in fixed source order: search,
/// then map, then places.
///
/// No identity resolution happens across sources. A venue present in two
/// providers yields two rows, distinguishable by `source`; downstream
/// consumers may dedup later.
pub fn merge_snapshots(
    search: &[ProviderSnapshot],
    map: &[ProviderSnapshot],
    places: &[ProviderSnapshot],
) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();
    adapt_snapshots(&SearchAdapter::new(), search, &mut outcome);
    adapt_snapshots(&MapAdapter::new(), map, &mut outcome);
    adapt_snapshots(&PlacesAdapter::new(), places, &mut outcome);
    outcome
}

/// Write the master table with the fixed column order. The column set is
/// the `VenueRow` field order; absent fields become empty cells.
pub fn write_master_csv(rows: &[VenueRow], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Read a master table back into typed rows.
pub fn read_master_csv(path: &Path) -> Result<Vec<VenueRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: VenueRow = record?;
        rows.push(row);
    }
    Ok(rows)
}

pub fn summarize(rows: &[VenueRow]) -> MergeSummary {
    let mut summary = MergeSummary::default();
    for row in rows {
        *summary
            .by_source
            .entry(row.source.to_string())
            .or_insert(0) += 1;
        *summary.by_category.entry(row.category.clone()).or_insert(0) += 1;
    }
    summary
}
