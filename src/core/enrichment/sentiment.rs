//! World-sentiment enrichment sidecar. Queries a configured sentiment
//! index endpoint and surfaces a single `[-1, 1]`-ish scalar summarizing
//! ambient global mood, rate limited and cached like `NewsProvider`.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::{cache_key, ContextProvider, FileCache, RateLimiter};
use crate::core::domain::{Event, EnrichmentContext};
use crate::error::Result;

const MIN_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize, serde::Serialize, Clone)]
struct SentimentCacheEntry {
    index: f64,
}

#[derive(Deserialize)]
struct SentimentResponse {
    index: f64,
}

pub struct SentimentProvider {
    client: reqwest::Client,
    endpoint: String,
    cache: FileCache,
    limiter: RateLimiter,
}

impl SentimentProvider {
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
impl ContextProvider for SentimentProvider {
    fn name(&self) -> &'static str {
        "world_sentiment"
    }

    async fn enrich(&self, event: &Event, context: &mut EnrichmentContext) -> Result<()> {
        let key = format!("sentiment:{}", cache_key(event));
        if let Some(cached) = self.cache.get::<SentimentCacheEntry>(&key) {
            context.world_temperature = Some(cached.index);
            return Ok(());
        }

        self.limiter.wait().await;

        let response: SentimentResponse = self
            .client
            .get(&self.endpoint)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        self.cache.put(&key, &SentimentCacheEntry { index: response.index });
        context.world_temperature = Some(response.index);
        Ok(())
    }
}
