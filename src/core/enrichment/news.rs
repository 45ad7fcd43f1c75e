//! News-summary enrichment sidecar. Hits a configured news search
//! endpoint for headlines relevant to the event's question, rate
//! limited and cached so repeated lookups for the same event within a
//! session don't re-query the upstream API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::{cache_key, ContextProvider, FileCache, RateLimiter};
use crate::core::domain::{Event, EnrichmentContext};
use crate::error::Result;

const MIN_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Debug, Deserialize, serde::Serialize, Clone)]
struct NewsCacheEntry {
    summary: String,
}

#[derive(Deserialize)]
struct NewsSearchResponse {
    #[serde(default)]
    articles: Vec<NewsArticle>,
}

#[derive(Deserialize)]
struct NewsArticle {
    title: String,
}

pub struct NewsProvider {
    client: reqwest::Client,
    endpoint: String,
    cache: FileCache,
    limiter: RateLimiter,
}

impl NewsProvider {
    pub fn new(endpoint: impl Into<String>, cache_dir: impl Into<std::path::PathBuf>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            cache: FileCache::new(cache_dir),
            limiter: RateLimiter::new(MIN_INTERVAL),
        }
    }
}

#[async_trait]
impl ContextProvider for NewsProvider {
    fn name(&self) -> &'static str {
        "news"
    }

    async fn enrich(&self, event: &Event, context: &mut EnrichmentContext) -> Result<()> {
        let key = format!("news:{}", cache_key(event));
        if let Some(cached) = self.cache.get::<NewsCacheEntry>(&key) {
            context.news_summary = Some(cached.summary);
            return Ok(());
        }

        self.limiter.wait().await;

        let response: NewsSearchResponse = self
            .client
            .get(&self.endpoint)
            .query(&[("q", event.question.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let summary = response
            .articles
            .iter()
            .take(3)
            .map(|a| a.title.as_str())
            .collect::<Vec<_>>()
            .join("; ");

        if !summary.is_empty() {
            self.cache.put(&key, &NewsCacheEntry { summary: summary.clone() });
            context.news_summary = Some(summary);
        }

        Ok(())
    }
}
