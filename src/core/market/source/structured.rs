//! Primary market source: the structured markets API (spec.md §4.1).

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::core::domain::EventReference;
use crate::error::{Error, Result};

use super::{MarketSource, RawMarketData, RawOutcome};

#[derive(Debug, Deserialize)]
struct GammaOutcome {
    name: String,
    #[serde(default)]
    price: Option<Decimal>,
    #[serde(default = "default_active")]
    active: bool,
}

const fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct GammaMarket {
    question: String,
    #[serde(default)]
    description: String,
    slug: Option<String>,
    id: Option<String>,
    #[serde(default)]
    end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    outcomes: Vec<GammaOutcome>,
}

/// Queries a structured, Polymarket Gamma-style markets API by slug.
pub struct StructuredSource {
    client: reqwest::Client,
    base_url: String,
}

impl StructuredSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn slug_for(reference: &EventReference) -> Option<String> {
        match reference {
            EventReference::Slug(s) => Some(s.clone()),
            EventReference::MarketUrl(u) => u.rsplit('/').next().map(|s| s.to_string()),
            EventReference::FreeText(_) => None,
        }
    }
}

#[async_trait]
impl MarketSource for StructuredSource {
    fn name(&self) -> &'static str {
        "structured"
    }

    async fn fetch(&self, reference: &EventReference, timeout: Duration) -> Result<RawMarketData> {
        let slug = Self::slug_for(reference)
            .ok_or_else(|| Error::Resolution("structured source requires a slug or URL".to_string()))?;

        let url = format!("{}/markets?slug={}", self.base_url, slug);
        let market: GammaMarket = self
            .client
            .get(&url)
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(RawMarketData {
            question: market.question,
            rules: market.description,
            market_slug: market.slug,
            market_id: market.id,
            resolution_date: market.end_date,
            outcomes: market
                .outcomes
                .into_iter()
                .map(|o| RawOutcome {
                    name: o.name,
                    price: o.price,
                    active: o.active,
                    derived_group_key: None,
                })
                .collect(),
        })
    }
}
