//! C7 Pipeline Coordinator (spec.md §4.7): the single `Predict` entry
//! point. Resolves an event, classifies it, dispatches models per
//! outcome bounded by `O_max` concurrency, fuses and normalizes the
//! results, and evaluates a trade signal for the leading outcome — all
//! inside an overall `T_total` deadline.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt};
use tracing::{info, warn};
use uuid::Uuid;

use crate::app::config::Config;
use crate::core::domain::{Event, EventReference, FusedOutcome, NormalizationInfo, Prediction};
use crate::core::enrichment::{self, ContextProvider};
use crate::core::market::{low_probability, MarketGateway};
use crate::core::orchestrator::client::ModelClient;
use crate::core::orchestrator::registry::ModelRegistry;
use crate::core::{classifier, fusion, trade};
use crate::error::Result;

/// Everything the pipeline needs that isn't part of the per-call
/// request: the model registry, HTTP client, and enrichment providers.
/// Built once at startup and shared across `Predict` calls.
pub struct Pipeline {
    gateway: MarketGateway,
    registry: ModelRegistry,
    client: Box<dyn ModelClient>,
    news_provider: Box<dyn ContextProvider>,
    sentiment_provider: Box<dyn ContextProvider>,
}

impl Pipeline {
    pub fn new(
        gateway: MarketGateway,
        registry: ModelRegistry,
        client: Box<dyn ModelClient>,
        news_provider: Box<dyn ContextProvider>,
        sentiment_provider: Box<dyn ContextProvider>,
    ) -> Self {
        Self {
            gateway,
            registry,
            client,
            news_provider,
            sentiment_provider,
        }
    }

    /// Resolve and forecast a single event reference end to end.
    pub async fn predict(&self, reference: &EventReference, config: &Config) -> Result<Prediction> {
        let request_id = Uuid::new_v4();
        info!(%request_id, "predict started");
        let deadline = Instant::now() + config.timeouts.total();

        let mut event = self.gateway.resolve(reference, &config.timeouts).await?;
        classifier::classify(&mut event);

        if !event.is_mock {
            event.enrichment_context = enrichment::build_context(
                &event,
                &config.enrichment,
                self.news_provider.as_ref(),
                self.sentiment_provider.as_ref(),
            )
            .await;
        }

        let low_probability_notice = if event.is_mock {
            None
        } else {
            low_probability::check(&event.outcomes, self.gateway.low_probability_threshold())
        };

        if let Some(notice) = low_probability_notice {
            return Ok(Prediction {
                event,
                outcomes: Vec::new(),
                normalization: NormalizationInfo {
                    family_type: event_family(&event),
                    total_before: 0.0,
                    total_after: None,
                    normalized: false,
                    skipped_outcomes: Vec::new(),
                    diagnostic: Some("low-probability short-circuit; fusion skipped".to_string()),
                },
                trade_signal: None,
                timestamp: chrono::Utc::now(),
                timed_out: false,
                low_probability_notice: Some(notice),
            });
        }

        let timed_out = Arc::new(AtomicBool::new(false));
        // T_batch = min(T_model * 2, remaining deadline) (spec.md §5):
        // the per-outcome batch deadline is its own layer beneath the
        // overall T_total, recomputed against whatever time is left.
        let remaining = deadline.saturating_duration_since(Instant::now());
        let batch_timeout = config.timeouts.batch(remaining);

        let mut outcomes: Vec<FusedOutcome> = stream::iter(event.outcomes.clone().into_iter())
            .map(|outcome| {
                let timed_out = Arc::clone(&timed_out);
                async move {
                    let fused_result = tokio::time::timeout(
                        batch_timeout,
                        self.process_outcome(&event, &outcome.name, outcome.market_probability, config),
                    )
                    .await;

                    match fused_result {
                        Ok(fused) => fused,
                        Err(_) => {
                            timed_out.store(true, Ordering::SeqCst);
                            warn!(outcome = outcome.name, "outcome processing exceeded the per-outcome batch deadline");
                            fusion::fuse(
                                &outcome.name,
                                &[],
                                outcome.market_probability,
                                &self.registry,
                                &config.fusion,
                                event.category,
                            )
                        }
                    }
                }
            })
            .buffer_unordered(config.outcome_concurrency.max(1))
            .collect()
            .await;

        let normalization = fusion::normalize_all(&mut outcomes, event.family_type);

        let trade_signal = if event.is_mock {
            None
        } else {
            leading_outcome_by_ev(&event, &outcomes).and_then(|fused| {
                trade::evaluate(
                    fused,
                    leading_outcome_market_probability(&event, fused),
                    event.days_to_resolution(chrono::Utc::now()),
                    &config.trade,
                )
            })
        };

        Ok(Prediction {
            event,
            outcomes,
            normalization,
            trade_signal,
            timestamp: chrono::Utc::now(),
            timed_out: timed_out.load(Ordering::SeqCst),
            low_probability_notice: None,
        })
    }

    async fn process_outcome(
        &self,
        event: &Event,
        outcome_name: &str,
        market_probability: Option<f64>,
        config: &Config,
    ) -> FusedOutcome {
        let responses = crate::core::orchestrator::dispatch_all(
            event,
            outcome_name,
            self.client.as_ref(),
            &self.registry,
            &config.timeouts,
            config.model_concurrency,
        )
        .await;

        fusion::fuse(
            outcome_name,
            &responses,
            market_probability,
            &self.registry,
            &config.fusion,
            event.category,
        )
    }
}

fn event_family(event: &Event) -> crate::core::domain::FamilyType {
    event.family_type
}

/// The outcome the trade evaluator focuses on (spec.md §4.7 step 5): in
/// the single-outcome case the only outcome there is, otherwise the one
/// with the largest `|EV| = |ModelOnlyProb - marketProb|` — the outcome
/// where the model and the market disagree most.
fn leading_outcome_by_ev<'a>(event: &Event, outcomes: &'a [FusedOutcome]) -> Option<&'a FusedOutcome> {
    if outcomes.len() == 1 {
        return outcomes.first();
    }

    outcomes
        .iter()
        .filter_map(|fused| {
            let model_only = fused.model_only_prob?;
            let market = leading_outcome_market_probability(event, fused)?;
            Some((fused, (model_only - market).abs()))
        })
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(fused, _)| fused)
}

fn leading_outcome_market_probability(event: &Event, fused: &FusedOutcome) -> Option<f64> {
    event
        .outcomes
        .iter()
        .find(|o| o.name == fused.outcome_name)
        .and_then(|o| o.market_probability)
}
