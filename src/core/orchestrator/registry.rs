//! Read-only model registry (spec.md §4.4): loaded once from configuration,
//! never mutated afterward.

use crate::app::config::ModelEntry;

/// The set of configured models available for dispatch. Immutable once
/// constructed — a fresh `Predict` call reads from it but never writes.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    entries: Vec<ModelEntry>,
}

impl ModelRegistry {
    pub fn new(entries: Vec<ModelEntry>) -> Self {
        Self {
            entries: entries.into_iter().filter(|e| e.enabled).collect(),
        }
    }

    pub fn entries(&self) -> &[ModelEntry] {
        &self.entries
    }

    pub fn ids(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.id.clone()).collect()
    }

    pub fn get(&self, model_id: &str) -> Option<&ModelEntry> {
        self.entries.iter().find(|e| e.id == model_id)
    }

    /// A model's configured base weight, or `0.0` if it is not registered
    /// (which excludes it from fusion without panicking).
    pub fn get_weight(&self, model_id: &str) -> f64 {
        self.get(model_id).map(|e| e.base_weight).unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
