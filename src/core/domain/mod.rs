//! Pure domain types shared across the forecasting pipeline.
//!
//! Every entity here is immutable once constructed: each `Predict` call
//! produces a fresh graph, and nothing in this module holds process-wide
//! mutable state.

mod event;
mod fused_outcome;
mod model_response;
mod prediction;
mod reference;
mod trade_signal;

pub use event::{Category, EnrichmentContext, Event, FamilyType, Outcome};
pub use fused_outcome::FusedOutcome;
pub use model_response::{Confidence, ModelResponse};
pub use prediction::{LowProbabilityNotice, NormalizationInfo, Prediction};
pub use reference::EventReference;
pub use trade_signal::{Signal, TradeSignal};
