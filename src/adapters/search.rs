use super::{blank_row, non_empty_str, ProviderAdapter};
use crate::error::{AggregatorError, Result};
use crate::types::{RawItem, Source, VenueRow};

/// Adapter for search-provider results. These carry little more than a page
/// title and URL; every other canonical slot stays absent.
pub struct SearchAdapter;

impl SearchAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SearchAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderAdapter for SearchAdapter {
    fn source(&self) -> Source {
        Source::Search
    }

    fn adapt(&self, category: &str, item: &RawItem) -> Result<VenueRow> {
        if !item.is_object() {
            return Err(AggregatorError::MalformedRecord(
                "search result is not an object".to_string(),
            ));
        }

        let name = non_empty_str(item, "title");
        let url = non_empty_str(item, "url");
        if name.is_none() && url.is_none() {
            return Err(AggregatorError::MalformedRecord(
                "search result has neither title nor url".to_string(),
            ));
        }

        Ok(VenueRow {
            name,
            url,
            ..blank_row(self.source(), category)
        })
    }
}
