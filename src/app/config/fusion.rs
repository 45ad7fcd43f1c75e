//! Fusion parameters (spec.md §4.5, §6).

use std::collections::HashMap;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FusionParams {
    pub market_blend_alpha: f64,
    pub confidence_factors: HashMap<String, f64>,
    /// Calibrator identifier per category, e.g. `"politics" -> "identity"`.
    /// The default (absent) calibrator is the identity function.
    pub calibrators: HashMap<String, String>,
    /// Similarity threshold above which a secondary model's reasoning is
    /// suppressed from the fused summary as redundant.
    pub summary_similarity_threshold: f64,
}

impl Default for FusionParams {
    fn default() -> Self {
        Self {
            market_blend_alpha: 0.8,
            confidence_factors: HashMap::new(),
            calibrators: HashMap::new(),
            summary_similarity_threshold: 0.9,
        }
    }
}
