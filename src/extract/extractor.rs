use crate::constants::MIN_MATCH_LEN;
use crate::extract::patterns;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Structured attributes mined from one block of crawled page text.
///
/// Attractions are deduplicated, title-cased and lexically sorted so output
/// is deterministic regardless of scan order. The four generic dimensions
/// are presentation-only lists: deduplicated in scan order, not sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedAttributes {
    pub attractions: Vec<String>,
    pub age_groups: Vec<String>,
    pub pricing_info: Vec<String>,
    pub party_options: Vec<String>,
    pub special_features: Vec<String>,
}

/// Normalize a raw match to a readable display form, uppercasing the first
/// letter of every word ("multi-level arena" -> "Multi-Level Arena").
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut boundary = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if boundary {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            boundary = false;
        } else {
            out.push(c);
            boundary = true;
        }
    }
    out
}

/// Scan the original (non-lowercased) text with the category's attraction
/// patterns plus the common facility patterns. Matches shorter than the
/// noise threshold are discarded.
fn scan_attractions(text: &str, category: &str) -> Vec<String> {
    let mut found = BTreeSet::new();
    let attraction_patterns = patterns::attraction_patterns(category)
        .iter()
        .chain(patterns::common_facility_patterns());

    for pattern in attraction_patterns {
        for m in pattern.find_iter(text) {
            let matched = m.as_str().trim();
            if matched.chars().count() > MIN_MATCH_LEN {
                found.insert(title_case(matched));
            }
        }
    }

    found.into_iter().collect()
}

/// Scan one generic dimension, keeping the first occurrence of each exact
/// match text.
fn scan_dimension(text: &str, dimension_patterns: &[Regex]) -> Vec<String> {
    let mut matches: Vec<String> = Vec::new();
    for pattern in dimension_patterns {
        for m in pattern.find_iter(text) {
            let matched = m.as_str().to_string();
            if !matches.contains(&matched) {
                matches.push(matched);
            }
        }
    }
    matches
}

/// Apply the full pattern library to a block of crawled text.
///
/// Empty text yields all-empty attribute sets; a pattern that matches
/// nothing contributes nothing.
pub fn extract(text: &str, category: &str) -> ExtractedAttributes {
    ExtractedAttributes {
        attractions: scan_attractions(text, category),
        age_groups: scan_dimension(text, patterns::age_group_patterns()),
        pricing_info: scan_dimension(text, patterns::pricing_patterns()),
        party_options: scan_dimension(text, patterns::party_patterns()),
        special_features: scan_dimension(text, patterns::special_feature_patterns()),
    }
}
