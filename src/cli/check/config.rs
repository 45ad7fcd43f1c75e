use std::path::Path;

use crate::app::Config;
use crate::cli::output;
use crate::error::Result;

/// Validate the configuration file without forecasting anything.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    output::section("Configuration check");
    output::field("Config", path.display());

    let config = Config::load(path)?;
    output::success("Configuration file is valid");

    output::section("Summary");
    output::field("Models configured", config.models.entries.len());
    for entry in &config.models.entries {
        output::field(
            &entry.id,
            format!("{} (weight {:.2}, enabled {})", entry.display_name, entry.base_weight, entry.enabled),
        );
    }
    output::field("Model concurrency (C_max)", config.model_concurrency);
    output::field("Outcome concurrency (O_max)", config.outcome_concurrency);
    output::field("Market blend alpha", config.fusion.market_blend_alpha);
    output::field("Low-probability threshold", format!("{:.2}%", config.low_probability_threshold));
    output::field("Allow mock event", config.allow_mock_event);

    if config.enrichment.news || config.enrichment.world_sentiment {
        output::success("Enrichment sidecars enabled");
    } else {
        output::field("Enrichment", "disabled");
    }

    if config.enrichment.assistant && config.assistant_fallback_chain.is_empty() {
        output::warning("assistant enrichment is enabled but no fallback chain is configured");
    }

    output::success("Configuration check complete");
    Ok(())
}
