//! Optional enrichment sidecars (SPEC_FULL.md §3): auxiliary context
//! providers that a deployment can enable to enrich prompts with a news
//! summary or a world-sentiment index. The core forecasting path is
//! identical whether or not any provider is enabled — a disabled or
//! failed provider simply leaves `EnrichmentContext` fields `None`.

pub mod news;
pub mod sentiment;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::app::config::EnrichmentToggles;
use crate::core::domain::{Event, EnrichmentContext};
use crate::error::Result;

pub use news::NewsProvider;
pub use sentiment::SentimentProvider;

/// A pluggable sidecar that contributes one field of `EnrichmentContext`.
#[async_trait]
pub trait ContextProvider: Send + Sync {
    fn name(&self) -> &'static str;
    async fn enrich(&self, event: &Event, context: &mut EnrichmentContext) -> Result<()>;
}

/// Enforces a minimum interval between outbound calls so an enrichment
/// sidecar never hammers its upstream API.
pub struct RateLimiter {
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Mutex::new(None),
        }
    }

    /// Sleep (if needed) until the minimum interval since the last call
    /// has elapsed, then record this call's time.
    pub async fn wait(&self) {
        let sleep_for = {
            let mut last_call = self.last_call.lock();
            let now = Instant::now();
            let sleep_for = last_call
                .map(|prev| self.min_interval.saturating_sub(now.duration_since(prev)))
                .unwrap_or(Duration::ZERO);
            *last_call = Some(now + sleep_for);
            sleep_for
        };
        if !sleep_for.is_zero() {
            tokio::time::sleep(sleep_for).await;
        }
    }
}

/// A tiny on-disk cache so repeated lookups for the same event within a
/// short window don't re-hit the upstream API. An in-memory layer in
/// front of the file system absorbs repeated lookups within the same
/// process without a disk round trip.
pub struct FileCache {
    dir: PathBuf,
    memory: dashmap::DashMap<String, String>,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            memory: dashmap::DashMap::new(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let safe_key: String = key
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect();
        self.dir.join(format!("{safe_key}.json"))
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        if let Some(content) = self.memory.get(key) {
            return serde_json::from_str(&content).ok();
        }
        let path = self.path_for(key);
        let content = std::fs::read_to_string(&path).ok()?;
        let parsed = serde_json::from_str(&content).ok();
        self.memory.insert(key.to_string(), content);
        parsed
    }

    pub fn put<T: Serialize>(&self, key: &str, value: &T) {
        if std::fs::create_dir_all(&self.dir).is_err() {
            return;
        }
        let path = self.path_for(key);
        match serde_json::to_string(value) {
            Ok(content) => {
                if let Err(err) = std::fs::write(&path, &content) {
                    warn!(path = %path.display(), error = %err, "failed to write enrichment cache entry");
                }
                self.memory.insert(key.to_string(), content);
            }
            Err(err) => warn!(error = %err, "failed to serialize enrichment cache entry"),
        }
    }
}

fn cache_key(event: &Event) -> String {
    event.market_slug.clone().unwrap_or_else(|| event.question.clone())
}

/// Run every enabled provider against `event`, merging their
/// contributions into one `EnrichmentContext`. A provider that errors
/// is logged and skipped rather than failing the whole prediction.
pub async fn build_context(
    event: &Event,
    toggles: &EnrichmentToggles,
    news: &dyn ContextProvider,
    sentiment: &dyn ContextProvider,
) -> Option<EnrichmentContext> {
    let mut context = EnrichmentContext::default();

    if toggles.news {
        if let Err(err) = news.enrich(event, &mut context).await {
            warn!(provider = news.name(), error = %err, "enrichment provider failed");
        }
    }
    if toggles.world_sentiment {
        if let Err(err) = sentiment.enrich(event, &mut context).await {
            warn!(provider = sentiment.name(), error = %err, "enrichment provider failed");
        }
    }

    if context.is_empty() {
        None
    } else {
        Some(context)
    }
}

fn cache_dir_default() -> &'static Path {
    Path::new(".marketcast_cache")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::tempdir;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Cached {
        value: String,
    }

    #[test]
    fn file_cache_round_trips_a_value() {
        let dir = tempdir().unwrap();
        let cache = FileCache::new(dir.path());
        let value = Cached {
            value: "hello".to_string(),
        };
        cache.put("my-event-slug", &value);
        let loaded: Option<Cached> = cache.get("my-event-slug");
        assert_eq!(loaded, Some(value));
    }

    #[test]
    fn file_cache_miss_returns_none() {
        let dir = tempdir().unwrap();
        let cache = FileCache::new(dir.path());
        let loaded: Option<Cached> = cache.get("nonexistent");
        assert_eq!(loaded, None);
    }

    #[tokio::test]
    async fn rate_limiter_enforces_minimum_interval() {
        let limiter = RateLimiter::new(Duration::from_millis(20));
        let start = Instant::now();
        limiter.wait().await;
        limiter.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn cache_dir_default_is_a_dotfile_directory() {
        assert!(cache_dir_default().to_string_lossy().starts_with('.'));
    }
}
