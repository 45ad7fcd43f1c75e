use std::time::Duration;

use marketcast::core::domain::{Confidence, ModelResponse};

pub fn response(model_id: &str, probability: f64, confidence: Confidence) -> ModelResponse {
    ModelResponse {
        model_id: model_id.to_string(),
        probability,
        confidence,
        reasoning: format!("{model_id} reasons about the question"),
        latency: Duration::from_millis(5),
        error: None,
    }
}

pub fn failed(model_id: &str, error: &str) -> ModelResponse {
    ModelResponse::failed(model_id, error, Duration::from_millis(5))
}
