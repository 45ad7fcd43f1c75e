//! Crate-wide error taxonomy.
//!
//! Per-model failures are always recovered locally into a `ModelResponse`
//! slot and never surface here; only resolution, configuration, and
//! invariant failures propagate as `Error`.

use thiserror::Error;

/// Startup-time configuration failures. Fatal — no partial service.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("event reference could not be parsed: {0}")]
    Reference(String),

    #[error("market resolution failed: {0}")]
    Resolution(String),

    #[error("all models failed for outcome {outcome}")]
    Batch { outcome: String },

    #[error("deadline exceeded: {0}")]
    Timeout(String),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invariant violation: {0}")]
    Invariant(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
