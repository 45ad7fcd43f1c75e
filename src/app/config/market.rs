//! Market source endpoint configuration (spec.md §4.1, §6).

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub structured_base_url: String,
    pub query_base_url: String,
    pub scrape_base_url: String,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            structured_base_url: "https://gamma-api.polymarket.com".to_string(),
            query_base_url: "https://clob.polymarket.com".to_string(),
            scrape_base_url: "https://polymarket.com".to_string(),
        }
    }
}
