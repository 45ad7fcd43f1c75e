mod support;

use std::collections::HashMap;

use marketcast::app::config::{FusionParams, ModelEntry};
use marketcast::core::domain::{Category, Confidence};
use marketcast::core::orchestrator::registry::ModelRegistry;
use marketcast::core::fusion;

use support::model::response;

fn registry() -> ModelRegistry {
    ModelRegistry::new(vec![ModelEntry {
        id: "alpha".to_string(),
        display_name: "Alpha".to_string(),
        endpoint: "https://example.invalid/alpha".to_string(),
        base_weight: 1.0,
        enabled: true,
        fallback: None,
    }])
}

/// S6: a category with a configured `shrink_to_center` calibrator pulls
/// an overconfident model consensus toward 50 before it reaches the
/// market blend, and the fused outcome records that calibration ran.
#[test]
fn configured_calibrator_shrinks_consensus_toward_center() {
    let mut calibrators = HashMap::new();
    calibrators.insert("sports".to_string(), "shrink_to_center".to_string());
    let params = FusionParams {
        calibrators,
        ..FusionParams::default()
    };

    let responses = vec![response("alpha", 95.0, Confidence::High)];
    let fused = fusion::fuse("Yes", &responses, None, &registry(), &params, Category::Sports);

    assert!(fused.calibration_applied);
    assert!(fused.model_only_prob.unwrap() < 95.0);
    assert!(fused.model_only_prob.unwrap() > 50.0);
}

/// A category with no configured calibrator entry is left at the
/// identity calibration, unaffected by the rule configured above.
#[test]
fn uncalibrated_category_passes_through_unchanged() {
    let mut calibrators = HashMap::new();
    calibrators.insert("sports".to_string(), "shrink_to_center".to_string());
    let params = FusionParams {
        calibrators,
        ..FusionParams::default()
    };

    let responses = vec![response("alpha", 95.0, Confidence::High)];
    let fused = fusion::fuse("Yes", &responses, None, &registry(), &params, Category::Other);

    assert!(!fused.calibration_applied);
    assert_eq!(fused.model_only_prob, Some(95.0));
}
