//! Per-model, per-outcome prediction responses (spec.md §3).

use serde::Serialize;
use std::time::Duration;

/// A model's self-reported confidence in its probability estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    /// Weight multiplier applied on top of a model's base weight.
    pub fn factor(self) -> f64 {
        match self {
            Confidence::Low => 0.5,
            Confidence::Medium => 1.0,
            Confidence::High => 1.5,
        }
    }

    /// Parse case-insensitively, defaulting unknown values to `medium`
    /// per spec.md §6's wire-format rule.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Confidence::Low,
            "high" => Confidence::High,
            _ => Confidence::Medium,
        }
    }
}

/// A single model's response for one outcome.
#[derive(Debug, Clone, Serialize)]
pub struct ModelResponse {
    pub model_id: String,
    pub probability: f64,
    pub confidence: Confidence,
    pub reasoning: String,
    #[serde(skip)]
    pub latency: Duration,
    pub error: Option<String>,
}

impl ModelResponse {
    /// A response is valid iff there is no error and the probability is a
    /// finite real number in [0, 100].
    pub fn is_valid(&self) -> bool {
        self.error.is_none() && self.probability.is_finite() && (0.0..=100.0).contains(&self.probability)
    }

    pub fn failed(model_id: impl Into<String>, error: impl Into<String>, latency: Duration) -> Self {
        Self {
            model_id: model_id.into(),
            probability: f64::NAN,
            confidence: Confidence::Medium,
            reasoning: String::new(),
            latency,
            error: Some(error.into()),
        }
    }
}
