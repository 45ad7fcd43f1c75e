//! C4 ModelOrchestrator — dispatches one prompt per configured model for
//! a single outcome, bounded by `C_max` concurrency, with per-model
//! timeout/retry/backoff and tolerant JSON extraction (spec.md §4.4).

pub mod client;
pub mod extract;
pub mod fallback;
pub mod registry;

use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::app::config::Timeouts;
use crate::core::classifier::Dimension;
use crate::core::domain::{Confidence, Event, ModelResponse};
use crate::core::prompt;
use client::ModelClient;
use registry::ModelRegistry;

const MAX_RETRIES: u32 = 2;
const BACKOFF_SCHEDULE: [Duration; 2] = [Duration::from_secs(1), Duration::from_secs(2)];

/// Dispatch every enabled model in `registry` for a single outcome,
/// bounded by `concurrency` in-flight calls at a time. Never returns an
/// error: a model that fails after retries is represented as an invalid
/// `ModelResponse` rather than aborting the batch.
pub async fn dispatch_all(
    event: &Event,
    outcome_name: &str,
    client: &dyn ModelClient,
    registry: &ModelRegistry,
    timeouts: &Timeouts,
    concurrency: usize,
) -> Vec<ModelResponse> {
    let dimensions = crate::core::classifier::assign_dimensions(event.category, &registry.ids());

    stream::iter(dimensions.into_iter())
        .map(|(model_id, dimension)| {
            let event = event;
            async move {
                let entry = match registry.get(&model_id) {
                    Some(e) => e,
                    None => return ModelResponse::failed(model_id, "model not registered", Duration::ZERO),
                };
                dispatch_one(
                    event,
                    outcome_name,
                    &model_id,
                    &entry.endpoint,
                    dimension,
                    client,
                    timeouts.model_call(),
                )
                .await
            }
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await
}

async fn dispatch_one(
    event: &Event,
    outcome_name: &str,
    model_id: &str,
    endpoint: &str,
    dimension: Dimension,
    client: &dyn ModelClient,
    per_call_timeout: Duration,
) -> ModelResponse {
    let prompt_text = prompt::compose(event, outcome_name, model_id, dimension);

    let mut last_error = String::new();
    for attempt in 0..=MAX_RETRIES {
        let start = Instant::now();
        match client.complete(endpoint, &prompt_text, per_call_timeout).await {
            Ok(text) => match extract::extract(&text) {
                Ok(parsed) => {
                    debug!(model_id, attempt, "model response parsed");
                    return ModelResponse {
                        model_id: model_id.to_string(),
                        probability: parsed.probability,
                        confidence: parsed.confidence,
                        reasoning: parsed.reasoning,
                        latency: start.elapsed(),
                        error: None,
                    };
                }
                Err(err) => {
                    last_error = err.to_string();
                }
            },
            Err(err) => {
                last_error = err.to_string();
            }
        }

        if attempt < MAX_RETRIES {
            warn!(model_id, attempt, error = %last_error, "model call failed, retrying");
            tokio::time::sleep(BACKOFF_SCHEDULE[attempt as usize]).await;
        }
    }

    ModelResponse::failed(model_id, last_error, per_call_timeout)
}

/// A response carrying the model's self-reported confidence but no
/// error, used when an assistant-only fallback degrades gracefully.
pub fn default_medium_confidence_response(model_id: impl Into<String>, probability: f64) -> ModelResponse {
    ModelResponse {
        model_id: model_id.into(),
        probability,
        confidence: Confidence::Medium,
        reasoning: "fallback default".to_string(),
        latency: Duration::ZERO,
        error: None,
    }
}
