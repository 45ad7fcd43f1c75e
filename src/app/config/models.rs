//! Model registry configuration (spec.md §4.4, §6).

use serde::Deserialize;

/// A single configured model back-end.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelEntry {
    pub id: String,
    pub display_name: String,
    pub endpoint: String,
    pub base_weight: f64,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Model ID to use instead, if this model is unavailable. Used by the
    /// assistant-only fallback chain, not by core forecasting dispatch.
    pub fallback: Option<String>,
}

const fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelsConfig {
    #[serde(default)]
    pub entries: Vec<ModelEntry>,
}
