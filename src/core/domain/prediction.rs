//! `Prediction` — the final result envelope (spec.md §3, §4.7, §7).

use serde::Serialize;

use super::{Event, FamilyType, FusedOutcome, TradeSignal};

/// Diagnostic record of cross-outcome normalization (C5.NormalizeAll).
#[derive(Debug, Clone, Serialize)]
pub struct NormalizationInfo {
    pub family_type: FamilyType,
    pub total_before: f64,
    pub total_after: Option<f64>,
    pub normalized: bool,
    pub skipped_outcomes: Vec<usize>,
    /// Structured diagnostic, e.g. "conditional event detected —
    /// normalization skipped" or a zero-sum note.
    pub diagnostic: Option<String>,
}

/// Emitted when C1's low-probability filter short-circuits resolution.
#[derive(Debug, Clone, Serialize)]
pub struct LowProbabilityNotice {
    pub max_candidate: f64,
    pub threshold: f64,
}

/// The final result of a `Predict` invocation.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub event: Event,
    pub outcomes: Vec<FusedOutcome>,
    pub normalization: NormalizationInfo,
    pub trade_signal: Option<TradeSignal>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Set when the overall deadline (`T_total`) expired before every
    /// outcome finished fusing; the envelope still carries whatever
    /// outcomes completed.
    pub timed_out: bool,
    pub low_probability_notice: Option<LowProbabilityNotice>,
}

impl Prediction {
    /// Number of outcomes that received at least one valid model response.
    pub fn served_outcome_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.model_count > 0).count()
    }
}
