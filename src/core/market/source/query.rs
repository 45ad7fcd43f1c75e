//! Secondary market source: a direct REST-by-slug market lookup
//! (spec.md §4.1). Tried after the structured API fails or times out.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::core::domain::EventReference;
use crate::error::{Error, Result};

use super::{MarketSource, RawMarketData, RawOutcome};

#[derive(Debug, Deserialize)]
struct ClobToken {
    outcome: String,
    #[serde(default)]
    price: Option<Decimal>,
    #[serde(default = "default_closed_false")]
    closed: bool,
}

const fn default_closed_false() -> bool {
    false
}

#[derive(Debug, Deserialize)]
struct ClobMarket {
    question: String,
    #[serde(default)]
    market_slug: Option<String>,
    #[serde(default)]
    condition_id: Option<String>,
    #[serde(default)]
    end_date_iso: Option<DateTime<Utc>>,
    #[serde(default)]
    tokens: Vec<ClobToken>,
    #[serde(default)]
    description: String,
}

/// Queries a direct REST-by-slug market lookup endpoint (CLOB-style).
pub struct QuerySource {
    client: reqwest::Client,
    base_url: String,
}

impl QuerySource {
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
impl MarketSource for QuerySource {
    fn name(&self) -> &'static str {
        "query"
    }

    async fn fetch(&self, reference: &EventReference, timeout: Duration) -> Result<RawMarketData> {
        let slug = Self::slug_for(reference)
            .ok_or_else(|| Error::Resolution("query source requires a slug or URL".to_string()))?;

        let url = format!("{}/markets/{}", self.base_url, slug);
        let market: ClobMarket = self
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
            market_slug: market.market_slug,
            market_id: market.condition_id,
            resolution_date: market.end_date_iso,
            outcomes: market
                .tokens
                .into_iter()
                .map(|t| RawOutcome {
                    name: t.outcome,
                    price: t.price,
                    active: !t.closed,
                    derived_group_key: None,
                })
                .collect(),
        })
    }
}
