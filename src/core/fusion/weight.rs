//! Per-model weighting (spec.md §4.5): a model's fusion weight is its
//! configured base weight scaled by a confidence factor, which in turn
//! may be overridden per confidence level via configuration.

use std::collections::HashMap;

use crate::core::domain::{Confidence, ModelResponse};
use crate::core::orchestrator::registry::ModelRegistry;

fn confidence_factor(confidence: Confidence, overrides: &HashMap<String, f64>) -> f64 {
    let key = match confidence {
        Confidence::Low => "low",
        Confidence::Medium => "medium",
        Confidence::High => "high",
    };
    overrides.get(key).copied().unwrap_or_else(|| confidence.factor())
}

/// Fusion weight for one valid model response: `base_weight * confidence_factor`.
pub fn weight_of(response: &ModelResponse, registry: &ModelRegistry, overrides: &HashMap<String, f64>) -> f64 {
    registry.get_weight(&response.model_id) * confidence_factor(response.confidence, overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::ModelEntry;
    use std::time::Duration;

    fn registry() -> ModelRegistry {
        ModelRegistry::new(vec![ModelEntry {
            id: "m1".to_string(),
            display_name: "M1".to_string(),
            endpoint: "https://example.invalid".to_string(),
            base_weight: 2.0,
            enabled: true,
            fallback: None,
        }])
    }

    fn response(confidence: Confidence) -> ModelResponse {
        ModelResponse {
            model_id: "m1".to_string(),
            probability: 50.0,
            confidence,
            reasoning: String::new(),
            latency: Duration::ZERO,
            error: None,
        }
    }

    #[test]
    fn default_weight_scales_by_confidence_factor() {
        let overrides = HashMap::new();
        let weight = weight_of(&response(Confidence::High), &registry(), &overrides);
        assert_eq!(weight, 2.0 * 1.5);
    }

    #[test]
    fn override_replaces_default_confidence_factor() {
        let mut overrides = HashMap::new();
        overrides.insert("high".to_string(), 3.0);
        let weight = weight_of(&response(Confidence::High), &registry(), &overrides);
        assert_eq!(weight, 2.0 * 3.0);
    }
}
