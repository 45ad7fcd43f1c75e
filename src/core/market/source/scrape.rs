//! Last-resort market source: scraping the public market page HTML
//! (spec.md §4.1). Used only after the structured and query sources
//! both fail or time out.

use std::time::Duration;

use async_trait::async_trait;
use scraper::{Html, Selector};

use crate::core::domain::EventReference;
use crate::error::{Error, Result};

use super::{MarketSource, RawMarketData, RawOutcome};

/// Scrapes a market's public page for its question, rules text, and
/// per-outcome last-traded prices rendered into the page markup.
pub struct ScrapeSource {
    client: reqwest::Client,
    base_url: String,
}

impl ScrapeSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url_for(&self, reference: &EventReference) -> Option<String> {
        match reference {
            EventReference::MarketUrl(u) => Some(u.clone()),
            EventReference::Slug(s) => Some(format!("{}/event/{}", self.base_url, s)),
            EventReference::FreeText(_) => None,
        }
    }

    fn parse(html: &str) -> Result<RawMarketData> {
        let document = Html::parse_document(html);

        let question_sel = Selector::parse("h1[data-testid='market-question']")
            .map_err(|_| Error::Resolution("invalid question selector".to_string()))?;
        let rules_sel = Selector::parse("[data-testid='market-rules']")
            .map_err(|_| Error::Resolution("invalid rules selector".to_string()))?;
        let outcome_sel = Selector::parse("[data-testid='outcome-row']")
            .map_err(|_| Error::Resolution("invalid outcome selector".to_string()))?;
        let name_sel = Selector::parse("[data-testid='outcome-name']")
            .map_err(|_| Error::Resolution("invalid outcome name selector".to_string()))?;
        let price_sel = Selector::parse("[data-testid='outcome-price']")
            .map_err(|_| Error::Resolution("invalid outcome price selector".to_string()))?;

        let question = document
            .select(&question_sel)
            .next()
            .map(|el| el.text().collect::<String>())
            .ok_or_else(|| Error::Resolution("scrape: question element not found".to_string()))?;

        let rules = document
            .select(&rules_sel)
            .next()
            .map(|el| el.text().collect::<String>())
            .unwrap_or_default();

        let outcomes: Vec<RawOutcome> = document
            .select(&outcome_sel)
            .filter_map(|row| {
                let name = row.select(&name_sel).next()?.text().collect::<String>();
                let price = row
                    .select(&price_sel)
                    .next()
                    .and_then(|el| el.text().collect::<String>().trim().trim_end_matches('%').parse::<rust_decimal::Decimal>().ok())
                    .map(|pct| pct / rust_decimal::Decimal::from(100));
                Some(RawOutcome {
                    name: name.trim().to_string(),
                    price,
                    active: true,
                    derived_group_key: None,
                })
            })
            .collect();

        if outcomes.is_empty() {
            return Err(Error::Resolution(
                "scrape: no outcome rows found on page".to_string(),
            ));
        }

        Ok(RawMarketData {
            question: question.trim().to_string(),
            rules: rules.trim().to_string(),
            market_slug: None,
            market_id: None,
            resolution_date: None,
            outcomes,
        })
    }
}

#[async_trait]
impl MarketSource for ScrapeSource {
    fn name(&self) -> &'static str {
        "scrape"
    }

    async fn fetch(&self, reference: &EventReference, timeout: Duration) -> Result<RawMarketData> {
        let url = self
            .url_for(reference)
            .ok_or_else(|| Error::Resolution("scrape source requires a URL or slug".to_string()))?;

        let html = self
            .client
            .get(&url)
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Self::parse(&html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PAGE: &str = r#"
        <html><body>
            <h1 data-testid="market-question">Will X happen?</h1>
            <div data-testid="market-rules">Resolves YES if X occurs by year end.</div>
            <div data-testid="outcome-row">
                <span data-testid="outcome-name">Yes</span>
                <span data-testid="outcome-price">64%</span>
            </div>
            <div data-testid="outcome-row">
                <span data-testid="outcome-name">No</span>
                <span data-testid="outcome-price">36%</span>
            </div>
        </body></html>
    "#;

    #[test]
    fn parses_question_rules_and_outcomes_from_page() {
        let data = ScrapeSource::parse(SAMPLE_PAGE).unwrap();
        assert_eq!(data.question, "Will X happen?");
        assert_eq!(data.outcomes.len(), 2);
        assert_eq!(data.outcomes[0].name, "Yes");
    }

    #[test]
    fn missing_outcome_rows_is_a_resolution_error() {
        let html = "<html><body><h1 data-testid='market-question'>Q</h1></body></html>";
        let err = ScrapeSource::parse(html).unwrap_err();
        assert!(matches!(err, Error::Resolution(_)));
    }

    #[test]
    fn url_for_prefers_direct_market_url() {
        let source = ScrapeSource::new("https://polymarket.com");
        let reference = EventReference::MarketUrl("https://polymarket.com/event/foo".to_string());
        assert_eq!(
            source.url_for(&reference),
            Some("https://polymarket.com/event/foo".to_string())
        );
    }

    #[test]
    fn url_for_builds_from_slug() {
        let source = ScrapeSource::new("https://polymarket.com");
        let reference = EventReference::Slug("foo".to_string());
        assert_eq!(
            source.url_for(&reference),
            Some("https://polymarket.com/event/foo".to_string())
        );
    }
}
