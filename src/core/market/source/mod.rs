//! `MarketSource` — the abstract outbound interface queried by the
//! cascading gateway (spec.md §4.1, §6).

mod query;
mod scrape;
mod structured;

pub use query::QuerySource;
pub use scrape::ScrapeSource;
pub use structured::StructuredSource;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::core::domain::EventReference;
use crate::error::Result;

/// A single outcome as reported by a market source, before classification.
#[derive(Debug, Clone)]
pub struct RawOutcome {
    pub name: String,
    /// Raw market price in [0, 1], if the source reported one.
    pub price: Option<Decimal>,
    pub active: bool,
    pub derived_group_key: Option<String>,
}

/// Raw market data as reported by any one source, before C2 classification.
#[derive(Debug, Clone)]
pub struct RawMarketData {
    pub question: String,
    pub rules: String,
    pub market_slug: Option<String>,
    pub market_id: Option<String>,
    pub resolution_date: Option<DateTime<Utc>>,
    pub outcomes: Vec<RawOutcome>,
}

/// One of the three cascading market-data sources (spec.md §4.1):
/// structured-query, REST-by-slug, or HTML scrape.
#[async_trait]
pub trait MarketSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Resolve a reference to raw market data. Bounded by `timeout`;
    /// implementations must make the underlying HTTP call cancellable at
    /// that boundary rather than relying on the caller to poll.
    async fn fetch(&self, reference: &EventReference, timeout: Duration) -> Result<RawMarketData>;
}
