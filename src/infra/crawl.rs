use crate::config::CrawlConfig;
use crate::error::{AggregatorError, Result};
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Port for the external content-crawl collaborator.
///
/// Given a venue URL and a list of hinted subpage keywords, returns zero or
/// more text blocks. Callers must tolerate zero blocks (skip the venue) and
/// multiple blocks (concatenate before extraction).
#[async_trait]
pub trait ContentCrawler: Send + Sync {
    async fn fetch_content(&self, url: &str, subpage_hints: &[String]) -> Result<Vec<String>>;
}

/// Crawler backed by a contents API (Exa-style `/contents` endpoint): one
/// POST per venue, live-crawling the site plus a few hinted subpages.
pub struct ExaContentClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    subpages: u32,
}

impl ExaContentClient {
    pub fn new(config: &CrawlConfig) -> Result<Self> {
        let api_key = std::env::var("EXA_API_KEY")?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key,
            subpages: config.subpages,
        })
    }
}

#[async_trait]
impl ContentCrawler for ExaContentClient {
    async fn fetch_content(&self, url: &str, subpage_hints: &[String]) -> Result<Vec<String>> {
        let body = json!({
            "urls": [url],
            "text": true,
            "livecrawl": "preferred",
            "subpages": self.subpages,
            "subpage_target": subpage_hints,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AggregatorError::Api {
                message: format!("contents API returned {}", response.status()),
            });
        }

        let payload: serde_json::Value = response.json().await?;
        let blocks: Vec<String> = payload
            .get("results")
            .and_then(|v| v.as_array())
            .map(|results| {
                results
                    .iter()
                    .filter_map(|r| r.get("text").and_then(|t| t.as_str()))
                    .filter(|t| !t.trim().is_empty())
                    .map(|t| t.to_string())
                    .collect()
            })
            .unwrap_or_default();

        debug!("Retrieved {} text blocks for {}", blocks.len(), url);
        Ok(blocks)
    }
}
