mod support;

use marketcast::app::config::{FusionParams, ModelEntry};
use marketcast::core::domain::{Confidence, FamilyType};
use marketcast::core::orchestrator::registry::ModelRegistry;
use marketcast::core::{classifier, fusion};

use support::fixtures::event_with_outcomes;
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

/// S2: a three-way mutually-exclusive market (active prices summing near
/// 100) is classified as such, and fusion's cross-outcome normalization
/// rescales the fused probabilities back to a 100 total.
#[test]
fn mutually_exclusive_three_outcomes_normalize_to_one_hundred() {
    let mut event = event_with_outcomes(
        "Who wins the nomination?",
        vec![("Candidate A", 50.0), ("Candidate B", 30.0), ("Candidate C", 20.0)],
    );
    classifier::classify(&mut event);
    assert_eq!(event.family_type, FamilyType::MutuallyExclusive);

    let mut outcomes = vec![
        fusion::fuse("Candidate A", &[response("alpha", 55.0, Confidence::Medium)], Some(50.0), &registry(), &FusionParams::default(), event.category),
        fusion::fuse("Candidate B", &[response("alpha", 35.0, Confidence::Medium)], Some(30.0), &registry(), &FusionParams::default(), event.category),
        fusion::fuse("Candidate C", &[response("alpha", 25.0, Confidence::Medium)], Some(20.0), &registry(), &FusionParams::default(), event.category),
    ];

    let info = fusion::normalize_all(&mut outcomes, event.family_type);
    assert!(info.normalized);
    let total: f64 = outcomes.iter().filter_map(|o| o.model_only_prob).sum();
    assert!((total - 100.0).abs() < 1e-6);
}

/// S3: a date-keyed conditional series skips cross-outcome normalization
/// entirely, leaving each outcome's fused probability exactly as fusion
/// produced it.
#[test]
fn conditional_date_series_skips_normalization() {
    let mut event = event_with_outcomes(
        "When will the launch happen?",
        vec![("by Oct 30", 20.0), ("by Nov 15", 35.0), ("by Dec 1", 50.0)],
    );
    classifier::classify(&mut event);
    assert_eq!(event.family_type, FamilyType::Conditional);

    let mut outcomes = vec![
        fusion::fuse("by Oct 30", &[response("alpha", 25.0, Confidence::Medium)], Some(20.0), &registry(), &FusionParams::default(), event.category),
        fusion::fuse("by Nov 15", &[response("alpha", 40.0, Confidence::Medium)], Some(35.0), &registry(), &FusionParams::default(), event.category),
        fusion::fuse("by Dec 1", &[response("alpha", 55.0, Confidence::Medium)], Some(50.0), &registry(), &FusionParams::default(), event.category),
    ];
    let before: Vec<Option<f64>> = outcomes.iter().map(|o| o.model_only_prob).collect();

    let info = fusion::normalize_all(&mut outcomes, event.family_type);
    assert!(!info.normalized);
    let after: Vec<Option<f64>> = outcomes.iter().map(|o| o.model_only_prob).collect();
    assert_eq!(before, after);
}
