use crate::types::BaseVenue;
use std::collections::HashMap;

/// Select a bounded, category-balanced subset of venues for expensive
/// enrichment.
///
/// Venues are grouped by category preserving each category's original
/// relative order; each category contributes up to
/// `max(1, sample_size / category_count)` venues, in category first-seen
/// order, until the sample is full. Breadth across categories is
/// prioritized over depth within any one category, so coverage is not
/// guaranteed to be perfectly even when pools differ widely in size.
pub fn diverse_sample(venues: Vec<BaseVenue>, sample_size: usize) -> Vec<BaseVenue> {
    if venues.is_empty() || sample_size == 0 {
        return Vec::new();
    }

    let mut category_order: Vec<String> = Vec::new();
    let mut by_category: HashMap<String, Vec<BaseVenue>> = HashMap::new();
    for venue in venues {
        if !by_category.contains_key(&venue.category) {
            category_order.push(venue.category.clone());
        }
        by_category
            .entry(venue.category.clone())
            .or_default()
            .push(venue);
    }

    let per_category = std::cmp::max(1, sample_size / category_order.len());

    let mut sample = Vec::new();
    for category in &category_order {
        let bucket = by_category.remove(category).unwrap_or_default();
        sample.extend(bucket.into_iter().take(per_category));
        if sample.len() >= sample_size {
            break;
        }
    }

    sample.truncate(sample_size);
    sample
}
