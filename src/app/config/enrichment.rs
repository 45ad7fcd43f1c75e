//! Enrichment toggles (spec.md §6, §9).
//!
//! Each flag gates an optional sidecar `ContextProvider`; the core has
//! exactly one code path regardless of toggle state (spec.md §9).

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EnrichmentToggles {
    pub news: bool,
    pub world_sentiment: bool,
    pub assistant: bool,
}
