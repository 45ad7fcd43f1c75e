//! Assistant-only fallback chain (spec.md §4.4, SPEC_FULL §3): used by the
//! chat-surface collaborator, never by core per-outcome dispatch. Tries
//! each configured model in order, 20s per attempt, and degrades to a
//! literal default response if the whole chain is exhausted.

use std::time::Duration;

use tracing::warn;

use crate::core::domain::ModelResponse;
use crate::core::orchestrator::client::ModelClient;
use crate::core::orchestrator::registry::ModelRegistry;

const FALLBACK_TIMEOUT: Duration = Duration::from_secs(20);
const FALLBACK_SENTINEL: &str = "fallback_default";

/// Walk `chain` in order, returning the first model's successful
/// response. If every model in the chain fails, returns a sentinel
/// response with `model_id == "fallback_default"` rather than an error.
pub async fn resolve_with_fallback(
    chain: &[String],
    prompt: &str,
    registry: &ModelRegistry,
    client: &dyn ModelClient,
) -> ModelResponse {
    for model_id in chain {
        let Some(entry) = registry.get(model_id) else {
            continue;
        };
        match client.complete(&entry.endpoint, prompt, FALLBACK_TIMEOUT).await {
            Ok(text) => match crate::core::orchestrator::extract::extract(&text) {
                Ok(parsed) => {
                    return ModelResponse {
                        model_id: model_id.clone(),
                        probability: parsed.probability,
                        confidence: parsed.confidence,
                        reasoning: parsed.reasoning,
                        latency: Duration::ZERO,
                        error: None,
                    };
                }
                Err(err) => warn!(model_id, error = %err, "fallback model returned unparseable text"),
            },
            Err(err) => warn!(model_id, error = %err, "fallback model call failed"),
        }
    }

    warn!("assistant fallback chain exhausted; returning default sentinel");
    super::default_medium_confidence_response(FALLBACK_SENTINEL, 50.0)
}
