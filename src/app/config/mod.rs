//! Application configuration loading and validation (spec.md §6).
//!
//! Loaded once from a TOML file with environment-variable overrides for
//! sensitive values (model API keys), the same shape as the teacher's
//! `Config::load`/`validate`.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ConfigError, Result};

mod enrichment;
mod fusion;
mod logging;
mod market;
mod models;
mod timeouts;
mod trade;

pub use enrichment::EnrichmentToggles;
pub use fusion::FusionParams;
pub use logging::LoggingConfig;
pub use market::MarketConfig;
pub use models::{ModelEntry, ModelsConfig};
pub use timeouts::Timeouts;
pub use trade::TradeParams;

/// Main application configuration (spec.md §6).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub models: ModelsConfig,
    pub fusion: FusionParams,
    pub trade: TradeParams,
    pub timeouts: Timeouts,
    pub market: MarketConfig,
    pub low_probability_threshold: f64,
    pub assistant_fallback_chain: Vec<String>,
    pub enrichment: EnrichmentToggles,
    pub logging: LoggingConfig,
    /// Upper bound on concurrently dispatched models per outcome (`C_max`).
    pub model_concurrency: usize,
    /// Upper bound on concurrently processed outcomes (`O_max`).
    pub outcome_concurrency: usize,
    /// Allow the coordinator to substitute a mock `Event` when every
    /// `MarketSource` fails (spec.md §4.1, §4.7).
    pub allow_mock_event: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            models: ModelsConfig::default(),
            fusion: FusionParams::default(),
            trade: TradeParams::default(),
            timeouts: Timeouts::default(),
            market: MarketConfig::default(),
            low_probability_threshold: default_low_probability_threshold(),
            assistant_fallback_chain: Vec::new(),
            enrichment: EnrichmentToggles::default(),
            logging: LoggingConfig::default(),
            model_concurrency: default_model_concurrency(),
            outcome_concurrency: default_outcome_concurrency(),
            allow_mock_event: false,
        }
    }
}

const fn default_model_concurrency() -> usize {
    5
}

const fn default_outcome_concurrency() -> usize {
    3
}

const fn default_low_probability_threshold() -> f64 {
    1.0
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Self = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.models.entries.is_empty() {
            return Err(ConfigError::MissingField { field: "models" }.into());
        }
        for entry in &self.models.entries {
            if entry.base_weight <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: "models.base_weight",
                    reason: format!("model {} has non-positive base weight", entry.id),
                }
                .into());
            }
        }
        if !(0.0..=1.0).contains(&self.fusion.market_blend_alpha) {
            return Err(ConfigError::InvalidValue {
                field: "fusion.market_blend_alpha",
                reason: "must be in [0, 1]".to_string(),
            }
            .into());
        }
        if self.model_concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "model_concurrency",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.outcome_concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "outcome_concurrency",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.timeouts.total_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeouts.total_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
