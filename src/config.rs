use crate::error::{AggregatorError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    /// Seed domains per category, consumed by the discovery collaborators.
    /// Kept as configuration so the pipeline stays free of deployment-specific
    /// site lists.
    #[serde(default)]
    pub seeds: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct CrawlConfig {
    pub endpoint: String,
    pub timeout_seconds: u64,
    pub subpages: u32,
    pub subpage_hints: Vec<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    pub fn load_from(config_path: &str) -> Result<Self> {
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            AggregatorError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path, e
            ))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let raw = r#"
            [crawl]
            endpoint = "https://api.exa.ai/contents"
            timeout_seconds = 12
            subpages = 3
            subpage_hints = ["about", "prices"]

            [seeds]
            bowling = ["hollywoodbowl.co.uk", "tenpin.co.uk"]
        "#;
        let config: Config = toml::from_str(raw).unwrap();
        assert_eq!(config.crawl.subpages, 3);
        assert_eq!(config.crawl.subpage_hints.len(), 2);
        assert_eq!(config.seeds["bowling"].len(), 2);
    }

    #[test]
    fn test_seeds_are_optional() {
        let raw = r#"
            [crawl]
            endpoint = "https://api.exa.ai/contents"
            timeout_seconds = 12
            subpages = 2
            subpage_hints = []
        "#;
        let config: Config = toml::from_str(raw).unwrap();
        assert!(config.seeds.is_empty());
    }
}
