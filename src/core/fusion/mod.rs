//! C5 FusionEngine (spec.md §4.5): per-outcome weighted fusion of model
//! responses with the market price, followed by cross-outcome
//! normalization for mutually-exclusive outcome families.

pub mod calibration;
pub mod numeric;
pub mod summary;
pub mod weight;

use crate::app::config::FusionParams;
use crate::core::domain::{Category, FamilyType, FusedOutcome, ModelResponse, NormalizationInfo};
use crate::core::orchestrator::registry::ModelRegistry;
use calibration::{Calibrator, IdentityCalibrator, ShrinkToCenterCalibrator};

fn category_key(category: Category) -> &'static str {
    match category {
        Category::Politics => "politics",
        Category::Geopolitics => "geopolitics",
        Category::Economy => "economy",
        Category::Technology => "technology",
        Category::Sports => "sports",
        Category::Entertainment => "entertainment",
        Category::Other => "other",
    }
}

fn resolve_calibrator(category: Category, calibrators: &std::collections::HashMap<String, String>) -> Box<dyn Calibrator> {
    match calibrators.get(category_key(category)).map(String::as_str) {
        Some("shrink_to_center") => Box::new(ShrinkToCenterCalibrator { strength: 0.3 }),
        _ => Box::new(IdentityCalibrator),
    }
}

/// Fuse one outcome's valid model responses with its market price.
pub fn fuse(
    outcome_name: &str,
    responses: &[ModelResponse],
    market_probability: Option<f64>,
    registry: &ModelRegistry,
    params: &FusionParams,
    category: Category,
) -> FusedOutcome {
    let valid: Vec<&ModelResponse> = responses.iter().filter(|r| r.is_valid()).collect();
    let reasonings: Vec<String> = valid.iter().map(|r| r.reasoning.clone()).collect();
    let fused_summary = summary::build_summary(&reasonings, params.summary_similarity_threshold);

    if valid.is_empty() {
        return FusedOutcome {
            outcome_name: outcome_name.to_string(),
            model_only_prob: None,
            blended_prob: market_probability,
            uncertainty: 0.0,
            model_count: 0,
            disagreement: 0.0,
            summary: fused_summary,
            weight_source: if market_probability.is_some() {
                "market_only".to_string()
            } else {
                "none".to_string()
            },
            calibration_applied: false,
        };
    }

    let probs: Vec<f64> = valid.iter().map(|r| r.probability).collect();
    let weights: Vec<f64> = valid
        .iter()
        .map(|r| weight::weight_of(r, registry, &params.confidence_factors))
        .collect();

    let raw_mean = numeric::weighted_mean(&probs, &weights);
    let calibrator = resolve_calibrator(category, &params.calibrators);
    let calibrated = calibrator.calibrate(raw_mean).clamp(0.0, 100.0);
    let std_dev = numeric::weighted_std_dev(&probs, &weights, raw_mean);
    let disagreement = (std_dev / 50.0).min(1.0);

    let blended_prob = match market_probability {
        Some(market) => Some(params.market_blend_alpha * market + (1.0 - params.market_blend_alpha) * calibrated),
        None => Some(calibrated),
    };

    FusedOutcome {
        outcome_name: outcome_name.to_string(),
        model_only_prob: Some(calibrated),
        blended_prob,
        uncertainty: std_dev,
        model_count: valid.len(),
        disagreement,
        summary: fused_summary,
        weight_source: if market_probability.is_some() {
            "model+market blend".to_string()
        } else {
            "model_only".to_string()
        },
        calibration_applied: calibrator.name() != "identity",
    }
}

/// Cross-outcome normalization (spec.md §4.5): scales the served
/// probability of mutually-exclusive outcome sets to sum to 100.
/// `Conditional`, `Hybrid`, and `Binary` families are left untouched —
/// their outcomes may legitimately resolve independently.
pub fn normalize_all(outcomes: &mut [FusedOutcome], family_type: FamilyType) -> NormalizationInfo {
    let total_before = numeric::safe_sum(outcomes.iter().filter_map(|o| o.model_only_prob));

    if family_type != FamilyType::MutuallyExclusive {
        return NormalizationInfo {
            family_type,
            total_before,
            total_after: None,
            normalized: false,
            skipped_outcomes: Vec::new(),
            diagnostic: Some("non mutually-exclusive family; normalization skipped".to_string()),
        };
    }

    let present: Vec<(usize, f64)> = outcomes
        .iter()
        .enumerate()
        .filter_map(|(i, o)| o.model_only_prob.map(|v| (i, v)))
        .collect();
    let skipped_outcomes: Vec<usize> = outcomes
        .iter()
        .enumerate()
        .filter(|(_, o)| o.model_only_prob.is_none())
        .map(|(i, _)| i)
        .collect();

    if present.is_empty() {
        return NormalizationInfo {
            family_type,
            total_before,
            total_after: None,
            normalized: false,
            skipped_outcomes,
            diagnostic: Some("all outcomes null; normalization skipped".to_string()),
        };
    }

    if present.len() == 1 {
        let (idx, _) = present[0];
        outcomes[idx].model_only_prob = Some(100.0);
        return NormalizationInfo {
            family_type,
            total_before,
            total_after: Some(100.0),
            normalized: true,
            skipped_outcomes,
            diagnostic: Some("single non-null outcome normalized to 100".to_string()),
        };
    }

    let sum: f64 = numeric::safe_sum(present.iter().map(|(_, v)| *v));
    if sum == 0.0 {
        return NormalizationInfo {
            family_type,
            total_before,
            total_after: None,
            normalized: false,
            skipped_outcomes,
            diagnostic: Some("present outcomes sum to zero; normalization skipped".to_string()),
        };
    }

    let factor = 100.0 / sum;
    for (idx, value) in &present {
        outcomes[*idx].model_only_prob = Some(value * factor);
    }

    NormalizationInfo {
        family_type,
        total_before,
        total_after: Some(100.0),
        normalized: true,
        skipped_outcomes,
        diagnostic: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::ModelEntry;
    use std::time::Duration;

    fn registry() -> ModelRegistry {
        ModelRegistry::new(vec![
            ModelEntry {
                id: "a".to_string(),
                display_name: "A".to_string(),
                endpoint: "https://example.invalid".to_string(),
                base_weight: 1.0,
                enabled: true,
                fallback: None,
            },
            ModelEntry {
                id: "b".to_string(),
                display_name: "B".to_string(),
                endpoint: "https://example.invalid".to_string(),
                base_weight: 1.0,
                enabled: true,
                fallback: None,
            },
        ])
    }

    fn response(model_id: &str, probability: f64) -> ModelResponse {
        ModelResponse {
            model_id: model_id.to_string(),
            probability,
            confidence: crate::core::domain::Confidence::Medium,
            reasoning: format!("reasoning from {model_id}"),
            latency: Duration::ZERO,
            error: None,
        }
    }

    #[test]
    fn fuse_with_no_valid_responses_falls_back_to_market_only() {
        let responses = vec![ModelResponse::failed("a", "timeout", Duration::ZERO)];
        let fused = fuse("Yes", &responses, Some(60.0), &registry(), &FusionParams::default(), Category::Other);
        assert_eq!(fused.model_count, 0);
        assert_eq!(fused.model_only_prob, None);
        assert_eq!(fused.blended_prob, Some(60.0));
    }

    #[test]
    fn fuse_blends_model_consensus_with_market_price() {
        let responses = vec![response("a", 70.0), response("b", 70.0)];
        let params = FusionParams {
            market_blend_alpha: 0.5,
            ..FusionParams::default()
        };
        let fused = fuse("Yes", &responses, Some(50.0), &registry(), &params, Category::Other);
        assert_eq!(fused.model_only_prob, Some(70.0));
        assert_eq!(fused.blended_prob, Some(60.0));
        assert_eq!(fused.model_count, 2);
    }

    #[test]
    fn fuse_without_market_price_serves_model_only() {
        let responses = vec![response("a", 35.0), response("b", 45.0)];
        let fused = fuse("Yes", &responses, None, &registry(), &FusionParams::default(), Category::Other);
        assert_eq!(fused.blended_prob, fused.model_only_prob);
        assert_eq!(fused.weight_source, "model_only");
    }

    #[test]
    fn model_only_prob_is_always_in_range() {
        let responses = vec![response("a", 99.0), response("b", 1.0)];
        let fused = fuse("Yes", &responses, Some(50.0), &registry(), &FusionParams::default(), Category::Other);
        assert!(fused.model_only_prob_in_range());
    }

    fn fused(name: &str, blended: Option<f64>) -> FusedOutcome {
        FusedOutcome {
            outcome_name: name.to_string(),
            model_only_prob: blended,
            blended_prob: blended,
            uncertainty: 0.0,
            model_count: if blended.is_some() { 1 } else { 0 },
            disagreement: 0.0,
            summary: String::new(),
            weight_source: "model_only".to_string(),
            calibration_applied: false,
        }
    }

    #[test]
    fn normalize_mutually_exclusive_scales_to_one_hundred() {
        let mut outcomes = vec![fused("A", Some(40.0)), fused("B", Some(20.0)), fused("C", Some(20.0))];
        let info = normalize_all(&mut outcomes, FamilyType::MutuallyExclusive);
        assert!(info.normalized);
        let total: f64 = outcomes.iter().filter_map(|o| o.model_only_prob).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn normalize_conditional_is_a_no_op() {
        let mut outcomes = vec![fused("A", Some(40.0)), fused("B", Some(20.0))];
        let before: Vec<Option<f64>> = outcomes.iter().map(|o| o.model_only_prob).collect();
        let info = normalize_all(&mut outcomes, FamilyType::Conditional);
        assert!(!info.normalized);
        let after: Vec<Option<f64>> = outcomes.iter().map(|o| o.model_only_prob).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn normalize_all_null_outcomes_is_skipped() {
        let mut outcomes = vec![fused("A", None), fused("B", None)];
        let info = normalize_all(&mut outcomes, FamilyType::MutuallyExclusive);
        assert!(!info.normalized);
        assert_eq!(info.skipped_outcomes.len(), 2);
    }

    #[test]
    fn normalize_single_non_null_outcome_sets_it_to_one_hundred() {
        let mut outcomes = vec![fused("A", Some(12.0)), fused("B", None)];
        let info = normalize_all(&mut outcomes, FamilyType::MutuallyExclusive);
        assert!(info.normalized);
        assert_eq!(outcomes[0].model_only_prob, Some(100.0));
    }

    #[test]
    fn normalize_zero_sum_is_skipped_without_dividing_by_zero() {
        let mut outcomes = vec![fused("A", Some(0.0)), fused("B", Some(0.0))];
        let info = normalize_all(&mut outcomes, FamilyType::MutuallyExclusive);
        assert!(!info.normalized);
        assert!(outcomes[0].model_only_prob.is_some());
    }
}
