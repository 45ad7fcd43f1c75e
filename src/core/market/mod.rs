//! C1 MarketGateway — resolves an `EventReference` into a canonical
//! `Event`, cascading across market sources with bounded retries and an
//! overall time budget (spec.md §4.1).

pub mod low_probability;
pub mod source;

use std::time::{Duration, Instant};

use rust_decimal::prelude::ToPrimitive;
use tracing::{debug, warn};

use crate::app::config::Timeouts;
use crate::core::domain::{Category, Event, EventReference, FamilyType, Outcome};
use crate::error::{Error, Result};
use source::{MarketSource, QuerySource, RawMarketData, ScrapeSource, StructuredSource};

/// Per-source timeout ceiling, independent of the overall market budget.
const PER_SOURCE_TIMEOUT: Duration = Duration::from_secs(8);
const MAX_RETRIES_PER_SOURCE: u32 = 2;
const BACKOFF_BASE: Duration = Duration::from_millis(250);

/// Cascades across the structured, query, and scrape sources in order,
/// retrying each with backoff while the overall budget allows, and
/// falling back to a mock `Event` if every source is exhausted.
pub struct MarketGateway {
    sources: Vec<Box<dyn MarketSource>>,
    low_probability_threshold: f64,
    allow_mock_event: bool,
}

impl MarketGateway {
    pub fn new(
        structured_base_url: impl Into<String>,
        query_base_url: impl Into<String>,
        scrape_base_url: impl Into<String>,
        low_probability_threshold: f64,
        allow_mock_event: bool,
    ) -> Self {
        Self {
            sources: vec![
                Box::new(StructuredSource::new(structured_base_url)),
                Box::new(QuerySource::new(query_base_url)),
                Box::new(ScrapeSource::new(scrape_base_url)),
            ],
            low_probability_threshold,
            allow_mock_event,
        }
    }

    /// Resolve `reference` to a canonical `Event`, honoring `timeouts.market()`
    /// as the overall budget across every source and retry attempt.
    pub async fn resolve(&self, reference: &EventReference, timeouts: &Timeouts) -> Result<Event> {
        let deadline = Instant::now() + timeouts.market();

        match self.cascade(reference, deadline).await {
            Ok(raw) => Ok(Self::into_event(raw, false)),
            Err(err) if self.allow_mock_event => {
                warn!(error = %err, "all market sources exhausted; substituting mock event");
                Ok(Self::mock_event(reference))
            }
            Err(err) => Err(err),
        }
    }

    async fn cascade(&self, reference: &EventReference, deadline: Instant) -> Result<RawMarketData> {
        let mut last_error: Option<Error> = None;

        for source in &self.sources {
            for attempt in 0..=MAX_RETRIES_PER_SOURCE {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    return Err(last_error.unwrap_or_else(|| {
                        Error::Timeout("market gateway budget exhausted".to_string())
                    }));
                }
                let per_attempt_timeout = PER_SOURCE_TIMEOUT.min(remaining);

                match tokio::time::timeout(per_attempt_timeout, source.fetch(reference, per_attempt_timeout)).await
                {
                    Ok(Ok(raw)) => {
                        debug!(source = source.name(), attempt, "market source resolved");
                        return Ok(raw);
                    }
                    Ok(Err(err)) => {
                        debug!(source = source.name(), attempt, error = %err, "market source failed");
                        last_error = Some(err);
                    }
                    Err(_) => {
                        debug!(source = source.name(), attempt, "market source timed out");
                        last_error = Some(Error::Timeout(format!(
                            "{} source timed out after {:?}",
                            source.name(),
                            per_attempt_timeout
                        )));
                    }
                }

                if attempt < MAX_RETRIES_PER_SOURCE {
                    let backoff = BACKOFF_BASE * 2u32.pow(attempt);
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    tokio::time::sleep(backoff.min(remaining)).await;
                }
            }
        }

        Err(last_error.unwrap_or_else(|| Error::Resolution("no market sources configured".to_string())))
    }

    fn into_event(raw: RawMarketData, is_mock: bool) -> Event {
        let outcomes: Vec<Outcome> = raw
            .outcomes
            .into_iter()
            .map(|o| Outcome {
                name: o.name,
                market_probability: o.price.and_then(|p| (p * rust_decimal::Decimal::from(100)).to_f64()),
                active: o.active,
                derived_group_key: o.derived_group_key,
            })
            .collect();

        Event {
            question: raw.question,
            rules: raw.rules,
            market_slug: raw.market_slug,
            market_id: raw.market_id,
            resolution_date: raw.resolution_date,
            outcomes: Self::expand_multi_outcome(outcomes),
            family_type: FamilyType::Binary,
            category: Category::Other,
            classification_reason: String::new(),
            enrichment_context: None,
            is_mock,
        }
    }

    /// Multi-outcome expansion (spec.md §4.1): for event groups with more
    /// than one child market, keep only outcomes that are active, unique
    /// by name, and whose price is a finite value strictly between 0 and
    /// 1 (excluding the degenerate 0/1 closures of a resolved market).
    /// Source order is preserved. Single-outcome markets (ordinary binary
    /// Yes/No questions) pass through untouched, and the filter never
    /// empties an outcome set that already has at least one surviving
    /// candidate's worth of data to work with.
    fn expand_multi_outcome(outcomes: Vec<Outcome>) -> Vec<Outcome> {
        if outcomes.len() <= 1 {
            return outcomes;
        }

        let mut seen_names = std::collections::HashSet::new();
        let filtered: Vec<Outcome> = outcomes
            .iter()
            .filter(|o| o.active)
            .filter(|o| matches!(o.market_probability, Some(p) if p.is_finite() && p > 0.0 && p < 100.0))
            .filter(|o| seen_names.insert(o.name.clone()))
            .cloned()
            .collect();

        if filtered.is_empty() {
            outcomes
        } else {
            filtered
        }
    }

    /// Placeholder event substituted when every market source is exhausted.
    /// Downstream stages treat it like any other event except that
    /// low-probability filtering and trade-signal emission are skipped.
    fn mock_event(reference: &EventReference) -> Event {
        let question = match reference {
            EventReference::FreeText(text) => text.clone(),
            EventReference::MarketUrl(url) => url.clone(),
            EventReference::Slug(slug) => slug.clone(),
        };

        Event {
            question,
            rules: String::new(),
            market_slug: None,
            market_id: None,
            resolution_date: None,
            outcomes: vec![Outcome::new("Yes"), Outcome::new("No")],
            family_type: FamilyType::Binary,
            category: Category::Other,
            classification_reason: "mock event: all market sources exhausted".to_string(),
            enrichment_context: None,
            is_mock: true,
        }
    }

    pub fn low_probability_threshold(&self) -> f64 {
        self.low_probability_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod expand_multi_outcome {
        use super::*;

        #[test]
        fn single_outcome_passes_through_untouched() {
            let outcomes = vec![Outcome::new("Yes")];
            let result = MarketGateway::expand_multi_outcome(outcomes.clone());
            assert_eq!(result.len(), 1);
        }

        #[test]
        fn drops_inactive_and_duplicate_and_degenerate_outcomes() {
            let mut inactive = Outcome::new("Candidate A").with_market_probability(40.0);
            inactive.active = false;
            let degenerate_zero = Outcome::new("Candidate B").with_market_probability(0.0);
            let degenerate_full = Outcome::new("Candidate C").with_market_probability(100.0);
            let duplicate = Outcome::new("Candidate D").with_market_probability(20.0);
            let duplicate_again = Outcome::new("Candidate D").with_market_probability(25.0);
            let healthy = Outcome::new("Candidate E").with_market_probability(30.0);

            let result = MarketGateway::expand_multi_outcome(vec![
                inactive,
                degenerate_zero,
                degenerate_full,
                duplicate,
                duplicate_again,
                healthy,
            ]);

            assert_eq!(result.len(), 2);
            assert_eq!(result[0].name, "Candidate D");
            assert_eq!(result[1].name, "Candidate E");
        }

        #[test]
        fn falls_back_to_unfiltered_set_when_everything_is_filtered_out() {
            let mut a = Outcome::new("A").with_market_probability(40.0);
            a.active = false;
            let mut b = Outcome::new("B").with_market_probability(60.0);
            b.active = false;

            let result = MarketGateway::expand_multi_outcome(vec![a, b]);
            assert_eq!(result.len(), 2);
        }

        #[test]
        fn preserves_source_order() {
            let outcomes = vec![
                Outcome::new("Z").with_market_probability(10.0),
                Outcome::new("A").with_market_probability(20.0),
                Outcome::new("M").with_market_probability(70.0),
            ];
            let result = MarketGateway::expand_multi_outcome(outcomes);
            assert_eq!(
                result.iter().map(|o| o.name.as_str()).collect::<Vec<_>>(),
                vec!["Z", "A", "M"]
            );
        }
    }
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FlakySource {
        calls: Arc<AtomicUsize>,
        fail_times: usize,
    }

    #[async_trait]
    impl MarketSource for FlakySource {
        fn name(&self) -> &'static str {
            "flaky"
        }

        async fn fetch(&self, _reference: &EventReference, _timeout: Duration) -> Result<RawMarketData> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.fail_times {
                return Err(Error::Resolution("transient failure".to_string()));
            }
            Ok(RawMarketData {
                question: "Will X happen?".to_string(),
                rules: String::new(),
                market_slug: None,
                market_id: None,
                resolution_date: None,
                outcomes: vec![],
            })
        }
    }

    struct AlwaysFails;

    #[async_trait]
    impl MarketSource for AlwaysFails {
        fn name(&self) -> &'static str {
            "always-fails"
        }

        async fn fetch(&self, _reference: &EventReference, _timeout: Duration) -> Result<RawMarketData> {
            Err(Error::Resolution("nope".to_string()))
        }
    }

    fn gateway_with(sources: Vec<Box<dyn MarketSource>>, allow_mock: bool) -> MarketGateway {
        MarketGateway {
            sources,
            low_probability_threshold: 1.0,
            allow_mock_event: allow_mock,
        }
    }

    #[tokio::test]
    async fn succeeds_after_transient_failures_within_retry_budget() {
        let gateway = gateway_with(
            vec![Box::new(FlakySource {
                calls: Arc::new(AtomicUsize::new(0)),
                fail_times: 1,
            })],
            false,
        );
        let reference = EventReference::Slug("foo".to_string());
        let timeouts = Timeouts::default();
        let event = gateway.resolve(&reference, &timeouts).await.unwrap();
        assert_eq!(event.question, "Will X happen?");
        assert!(!event.is_mock);
    }

    #[tokio::test]
    async fn falls_back_to_mock_event_when_all_sources_exhausted() {
        let gateway = gateway_with(vec![Box::new(AlwaysFails)], true);
        let reference = EventReference::Slug("foo".to_string());
        let timeouts = Timeouts::default();
        let event = gateway.resolve(&reference, &timeouts).await.unwrap();
        assert!(event.is_mock);
    }

    #[tokio::test]
    async fn propagates_error_when_mock_event_disallowed() {
        let gateway = gateway_with(vec![Box::new(AlwaysFails)], false);
        let reference = EventReference::Slug("foo".to_string());
        let timeouts = Timeouts::default();
        assert!(gateway.resolve(&reference, &timeouts).await.is_err());
    }
}
