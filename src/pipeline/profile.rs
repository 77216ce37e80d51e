use crate::constants::{
    CONTENT_SUMMARY_CHARS, CRAWL_DELAY_MS, ENRICHMENT_SUMMARY_NAME, MAX_PRICING_ITEMS,
    TOP_ATTRACTIONS, TOP_SPECIAL_FEATURES,
};
use crate::error::Result;
use crate::extract::extractor;
use crate::infra::crawl::ContentCrawler;
use crate::pipeline::sampler;
use crate::types::BaseVenue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// An enriched venue record: the base fields verbatim plus the attribute
/// sets mined from crawled page text. Built once per crawled venue and
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueProfile {
    pub name: String,
    pub category: String,
    pub website: String,
    pub address: String,
    pub postcode: String,
    pub rating: Option<f64>,
    pub phone: Option<String>,
    pub attractions: Vec<String>,
    pub age_groups: Vec<String>,
    pub pricing_info: Vec<String>,
    pub party_options: Vec<String>,
    pub special_features: Vec<String>,
    /// Untruncated character count, kept for downstream quality assessment
    pub content_length: usize,
    pub content_summary: String,
}

/// Build one profile from a venue and its retrieved content.
///
/// The pricing list is capped so degenerate price-heavy pages cannot flood
/// the output; the summary keeps the first `CONTENT_SUMMARY_CHARS`
/// characters with a trailing ellipsis marker when truncated.
pub fn build_profile(venue: &BaseVenue, content: &str) -> VenueProfile {
    let mut attributes = extractor::extract(content, &venue.category);
    attributes.pricing_info.truncate(MAX_PRICING_ITEMS);

    let content_length = content.chars().count();
    let content_summary = if content_length > CONTENT_SUMMARY_CHARS {
        let mut summary: String = content.chars().take(CONTENT_SUMMARY_CHARS).collect();
        summary.push_str("...");
        summary
    } else {
        content.to_string()
    };

    VenueProfile {
        name: venue.name.clone(),
        category: venue.category.clone(),
        website: venue.website.clone(),
        address: venue.address.clone(),
        postcode: venue.postcode.clone(),
        rating: venue.rating,
        phone: venue.phone.clone(),
        attractions: attributes.attractions,
        age_groups: attributes.age_groups,
        pricing_info: attributes.pricing_info,
        party_options: attributes.party_options,
        special_features: attributes.special_features,
        content_length,
        content_summary,
    }
}

/// One (value, occurrences) entry in the aggregate summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountEntry {
    pub name: String,
    pub count: usize,
}

/// Aggregate document written once per enrichment run.
#[derive(Debug, Serialize, Deserialize)]
pub struct EnrichmentSummary {
    pub total_venues_enriched: usize,
    pub venues_skipped_empty: usize,
    pub venues_failed: usize,
    pub categories_covered: BTreeMap<String, usize>,
    pub top_attractions: Vec<CountEntry>,
    pub top_special_features: Vec<CountEntry>,
    pub generated_at: DateTime<Utc>,
}

/// Result of one enrichment run over a sampled venue set.
#[derive(Debug, Default)]
pub struct EnrichmentOutcome {
    pub profiles: Vec<VenueProfile>,
    /// Venues whose crawl returned no usable text
    pub empty_content: usize,
    /// Venues whose crawl call failed outright
    pub failures: usize,
}

fn profile_file_name(index: usize, venue_name: &str) -> String {
    let slug: String = venue_name
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .take(25)
        .collect();
    format!("profile_{:02}_{}.json", index, slug)
}

fn top_counts<'a, I: Iterator<Item = &'a String>>(values: I, limit: usize) -> Vec<CountEntry> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        *counts.entry(value.as_str()).or_insert(0) += 1;
    }
    let mut entries: Vec<CountEntry> = counts
        .into_iter()
        .map(|(name, count)| CountEntry {
            name: name.to_string(),
            count,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    entries.truncate(limit);
    entries
}

fn build_summary(outcome: &EnrichmentOutcome) -> EnrichmentSummary {
    let mut categories_covered = BTreeMap::new();
    for profile in &outcome.profiles {
        *categories_covered.entry(profile.category.clone()).or_insert(0) += 1;
    }

    EnrichmentSummary {
        total_venues_enriched: outcome.profiles.len(),
        venues_skipped_empty: outcome.empty_content,
        venues_failed: outcome.failures,
        categories_covered,
        top_attractions: top_counts(
            outcome.profiles.iter().flat_map(|p| p.attractions.iter()),
            TOP_ATTRACTIONS,
        ),
        top_special_features: top_counts(
            outcome.profiles.iter().flat_map(|p| p.special_features.iter()),
            TOP_SPECIAL_FEATURES,
        ),
        generated_at: Utc::now(),
    }
}

/// Run the enrichment batch: sample the pool, crawl each sampled venue,
/// extract attributes, and write one profile document per venue plus the
/// aggregate summary.
///
/// A venue whose crawl fails or yields no text is skipped and counted; no
/// failure inside the loop aborts the batch. Only artifact-write failures
/// propagate.
pub async fn run_enrichment(
    venues: Vec<BaseVenue>,
    sample_size: usize,
    subpage_hints: &[String],
    crawler: &dyn ContentCrawler,
    out_dir: &Path,
) -> Result<EnrichmentOutcome> {
    fs::create_dir_all(out_dir)?;

    let sample = sampler::diverse_sample(venues, sample_size);
    info!("Selected diverse sample of {} venues", sample.len());

    let mut outcome = EnrichmentOutcome::default();

    for (i, venue) in sample.iter().enumerate() {
        info!(
            "Crawling {}/{}: {} ({})",
            i + 1,
            sample.len(),
            venue.name,
            venue.category
        );

        let blocks = match crawler.fetch_content(&venue.website, subpage_hints).await {
            Ok(blocks) => blocks,
            Err(e) => {
                warn!("Crawl failed for {}: {}", venue.name, e);
                outcome.failures += 1;
                continue;
            }
        };

        // Multiple subpage blocks are concatenated before extraction
        let content = blocks.join("\n");
        if content.trim().is_empty() {
            info!("No content found for {}", venue.name);
            outcome.empty_content += 1;
            continue;
        }

        let profile = build_profile(venue, &content);
        let path = out_dir.join(profile_file_name(i + 1, &venue.name));
        fs::write(&path, serde_json::to_string_pretty(&profile)?)?;
        info!(
            "Found {} attractions for {}",
            profile.attractions.len(),
            profile.name
        );
        outcome.profiles.push(profile);

        // Fixed minimum delay between successive crawl calls
        tokio::time::sleep(Duration::from_millis(CRAWL_DELAY_MS)).await;
    }

    let summary = build_summary(&outcome);
    fs::write(
        out_dir.join(ENRICHMENT_SUMMARY_NAME),
        serde_json::to_string_pretty(&summary)?,
    )?;

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AggregatorError;
    use async_trait::async_trait;

    fn venue(name: &str, category: &str, website: &str) -> BaseVenue {
        BaseVenue {
            name: name.to_string(),
            category: category.to_string(),
            website: website.to_string(),
            address: "1 Test Way".to_string(),
            postcode: "E1 6AN".to_string(),
            rating: Some(4.5),
            phone: Some("020 7000 0000".to_string()),
        }
    }

    #[test]
    fn test_summary_truncation_and_length() {
        let content = "x".repeat(1000);
        let profile = build_profile(&venue("V", "bowling", "https://v.example"), &content);

        assert_eq!(profile.content_length, 1000);
        assert_eq!(profile.content_summary.chars().count(), 803);
        assert!(profile.content_summary.ends_with("..."));
    }

    #[test]
    fn test_short_content_is_kept_verbatim() {
        let profile = build_profile(&venue("V", "bowling", "https://v.example"), "ten pin bowling");
        assert_eq!(profile.content_length, 15);
        assert_eq!(profile.content_summary, "ten pin bowling");
        assert!(profile.attractions.contains(&"Ten Pin Bowling".to_string()));
    }

    #[test]
    fn test_pricing_list_is_capped() {
        let content = (1..=25)
            .map(|n| format!("£{}", n))
            .collect::<Vec<_>>()
            .join(" and ");
        let profile = build_profile(&venue("V", "bowling", "https://v.example"), &content);
        assert_eq!(profile.pricing_info.len(), MAX_PRICING_ITEMS);
    }

    #[test]
    fn test_base_fields_copied_verbatim() {
        let base = venue("Rowans", "bowling", "https://rowans.co.uk");
        let profile = build_profile(&base, "some content here");
        assert_eq!(profile.name, base.name);
        assert_eq!(profile.category, base.category);
        assert_eq!(profile.website, base.website);
        assert_eq!(profile.rating, base.rating);
        assert_eq!(profile.phone, base.phone);
    }

    struct FakeCrawler;

    #[async_trait]
    impl ContentCrawler for FakeCrawler {
        async fn fetch_content(&self, url: &str, _hints: &[String]) -> Result<Vec<String>> {
            if url.contains("good") {
                Ok(vec![
                    "Ten pin bowling with 12 bowling lanes.".to_string(),
                    "Birthday parties from £15 per person.".to_string(),
                ])
            } else if url.contains("empty") {
                Ok(Vec::new())
            } else {
                Err(AggregatorError::Api {
                    message: "crawl timed out".to_string(),
                })
            }
        }
    }

    #[tokio::test]
    async fn test_enrichment_isolates_per_venue_failures() {
        let dir = tempfile::tempdir().unwrap();
        let venues = vec![
            venue("Good Lanes", "bowling", "https://good.example"),
            venue("Empty Page", "karting", "https://empty.example"),
            venue("Broken Site", "climbing", "https://broken.example"),
        ];

        let outcome = run_enrichment(venues, 3, &[], &FakeCrawler, dir.path())
            .await
            .unwrap();

        assert_eq!(outcome.profiles.len(), 1);
        assert_eq!(outcome.empty_content, 1);
        assert_eq!(outcome.failures, 1);

        // Only the successful venue produced an artifact
        let profile_files: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|n| n.starts_with("profile_"))
            .collect();
        assert_eq!(profile_files, vec!["profile_01_good_lanes.json".to_string()]);

        // Multi-block content was concatenated before extraction
        let profile = &outcome.profiles[0];
        assert!(profile.attractions.contains(&"Ten Pin Bowling".to_string()));
        assert!(profile.pricing_info.iter().any(|p| p.contains("£15")));
    }

    #[tokio::test]
    async fn test_enrichment_writes_summary_document() {
        let dir = tempfile::tempdir().unwrap();
        let venues = vec![venue("Good Lanes", "bowling", "https://good.example")];

        run_enrichment(venues, 1, &[], &FakeCrawler, dir.path())
            .await
            .unwrap();

        let raw = fs::read_to_string(dir.path().join(ENRICHMENT_SUMMARY_NAME)).unwrap();
        let summary: EnrichmentSummary = serde_json::from_str(&raw).unwrap();
        assert_eq!(summary.total_venues_enriched, 1);
        assert_eq!(summary.categories_covered["bowling"], 1);
        assert!(!summary.top_attractions.is_empty());
    }

    #[test]
    fn test_top_counts_orders_by_frequency() {
        let values = vec![
            "Foam Pit".to_string(),
            "Foam Pit".to_string(),
            "Ninja Course".to_string(),
        ];
        let top = top_counts(values.iter(), 10);
        assert_eq!(top[0].name, "Foam Pit");
        assert_eq!(top[0].count, 2);
        assert_eq!(top[1].count, 1);
    }

    #[test]
    fn test_profile_file_name_slug() {
        assert_eq!(
            profile_file_name(3, "Flip Out / Wandsworth"),
            "profile_03_flip_out__wandsworth.json"
        );
    }
}
