//! Canonical resolved event and outcome types (spec.md §3).

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Broad topical classification, assigned by the event classifier (C2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Politics,
    Geopolitics,
    Economy,
    Technology,
    Sports,
    Entertainment,
    Other,
}

/// How an outcome set resolves relative to its siblings, assigned by C2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyType {
    /// Single implicit-complement outcome, or two complementary outcomes.
    Binary,
    /// Exactly one outcome in the set resolves true.
    MutuallyExclusive,
    /// Outcomes may resolve independently (date/price-threshold series).
    Conditional,
    /// Conservative default when the heuristics in C2 disagree; treated
    /// like `Conditional` for normalization purposes.
    Hybrid,
}

/// Optional auxiliary context from pluggable enrichers (news, sentiment).
/// Absent unless an enricher is configured and enabled.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EnrichmentContext {
    pub world_temperature: Option<f64>,
    pub news_summary: Option<String>,
}

impl EnrichmentContext {
    pub fn is_empty(&self) -> bool {
        self.world_temperature.is_none() && self.news_summary.is_none()
    }
}

/// A single resolvable outcome within an event's outcome set.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub name: String,
    pub market_probability: Option<f64>,
    pub active: bool,
    /// Optional grouping key for conditional families (e.g. a date bucket).
    pub derived_group_key: Option<String>,
}

impl Outcome {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            market_probability: None,
            active: true,
            derived_group_key: None,
        }
    }

    pub fn with_market_probability(mut self, probability: f64) -> Self {
        self.market_probability = Some(probability);
        self
    }
}

/// The canonical, resolved form of a prediction-market event.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub question: String,
    pub rules: String,
    pub market_slug: Option<String>,
    pub market_id: Option<String>,
    pub resolution_date: Option<DateTime<Utc>>,
    pub outcomes: Vec<Outcome>,
    pub family_type: FamilyType,
    pub category: Category,
    /// Surfaced for later tuning, per spec.md §9's open question about the
    /// `mutually_exclusive` vs `conditional` heuristic.
    pub classification_reason: String,
    pub enrichment_context: Option<EnrichmentContext>,
    /// Set when C1 exhausted all market sources and the coordinator
    /// substituted a placeholder event. Downstream components handle this
    /// identically except that low-probability filtering is skipped and
    /// no trade signal is emitted.
    pub is_mock: bool,
}

impl Event {
    pub fn is_multi_option(&self) -> bool {
        self.outcomes.len() > 1
    }

    /// Days remaining until resolution, derived from `resolution_date`.
    /// `None` when no resolution date is known; never negative.
    pub fn days_to_resolution(&self, now: DateTime<Utc>) -> Option<f64> {
        self.resolution_date.map(|d| {
            let secs = (d - now).num_seconds() as f64;
            (secs / 86_400.0).max(0.0)
        })
    }

    /// Checks invariant: for `mutually_exclusive` families with ≥2 active
    /// outcomes, active market probabilities should sum to roughly 100
    /// (observed-market tolerance of [80, 120]). Returns `true` when the
    /// invariant does not apply (too few active outcomes, or non-ME
    /// family) or holds.
    pub fn mutually_exclusive_sum_in_tolerance(&self) -> bool {
        if self.family_type != FamilyType::MutuallyExclusive {
            return true;
        }
        let active: Vec<f64> = self
            .outcomes
            .iter()
            .filter(|o| o.active)
            .filter_map(|o| o.market_probability)
            .collect();
        if active.len() < 2 {
            return true;
        }
        let sum: f64 = active.iter().sum();
        (80.0..=120.0).contains(&sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event(family: FamilyType, probs: &[f64]) -> Event {
        Event {
            question: "Q".to_string(),
            rules: String::new(),
            market_slug: None,
            market_id: None,
            resolution_date: None,
            outcomes: probs
                .iter()
                .enumerate()
                .map(|(i, p)| Outcome::new(format!("O{i}")).with_market_probability(*p))
                .collect(),
            family_type: family,
            category: Category::Other,
            classification_reason: String::new(),
            enrichment_context: None,
            is_mock: false,
        }
    }

    #[test]
    fn is_multi_option_true_for_two_or_more_outcomes() {
        let event = sample_event(FamilyType::MutuallyExclusive, &[50.0, 50.0]);
        assert!(event.is_multi_option());
    }

    #[test]
    fn is_multi_option_false_for_single_outcome() {
        let event = sample_event(FamilyType::Binary, &[50.0]);
        assert!(!event.is_multi_option());
    }

    #[test]
    fn days_to_resolution_never_negative() {
        let mut event = sample_event(FamilyType::Binary, &[50.0]);
        event.resolution_date = Some(Utc::now() - chrono::Duration::days(5));
        assert_eq!(event.days_to_resolution(Utc::now()), Some(0.0));
    }

    #[test]
    fn mutually_exclusive_sum_within_tolerance() {
        let event = sample_event(FamilyType::MutuallyExclusive, &[40.0, 35.0, 30.0]);
        assert!(event.mutually_exclusive_sum_in_tolerance());
    }

    #[test]
    fn mutually_exclusive_sum_outside_tolerance() {
        let event = sample_event(FamilyType::MutuallyExclusive, &[10.0, 5.0, 3.0]);
        assert!(!event.mutually_exclusive_sum_in_tolerance());
    }

    #[test]
    fn non_me_family_skips_sum_check() {
        let event = sample_event(FamilyType::Conditional, &[10.0, 5.0, 3.0]);
        assert!(event.mutually_exclusive_sum_in_tolerance());
    }

    #[test]
    fn single_active_outcome_skips_sum_check() {
        let event = sample_event(FamilyType::MutuallyExclusive, &[40.0]);
        assert!(event.mutually_exclusive_sum_in_tolerance());
    }
}
