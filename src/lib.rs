//! marketcast - Multi-model forecasting for prediction-market events.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── core/
//! │   ├── domain/        # Pure, immutable domain types
//! │   ├── market/        # C1 MarketGateway + cascading sources
//! │   ├── classifier.rs  # C2 EventClassifier
//! │   ├── prompt.rs       # C3 PromptComposer
//! │   ├── orchestrator/  # C4 ModelOrchestrator
//! │   ├── fusion/         # C5 FusionEngine
//! │   ├── trade.rs        # C6 TradeSignalEvaluator
//! │   ├── enrichment/     # Optional context sidecars
//! │   └── pipeline.rs     # C7 Pipeline Coordinator (`Predict`)
//! └── app/                # Configuration and application wiring
//! ```

pub mod app;
pub mod cli;
pub mod core;
pub mod error;
