//! `FusedOutcome` — the per-outcome result of C5 fusion (spec.md §3, §4.5).

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct FusedOutcome {
    pub outcome_name: String,
    pub model_only_prob: Option<f64>,
    pub blended_prob: Option<f64>,
    pub uncertainty: f64,
    pub model_count: usize,
    pub disagreement: f64,
    pub summary: String,
    pub weight_source: String,
    pub calibration_applied: bool,
}

impl FusedOutcome {
    /// Spec.md §8 property 1: a non-null `ModelOnlyProb` is always in [0, 100].
    pub fn model_only_prob_in_range(&self) -> bool {
        match self.model_only_prob {
            Some(p) => (0.0..=100.0).contains(&p),
            None => true,
        }
    }
}
