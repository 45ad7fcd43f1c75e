//! The forecasting pipeline, end to end. Each submodule is one
//! component from the architecture: market resolution, classification,
//! prompt composition, model dispatch, fusion, and trade evaluation.
//! `pipeline` wires them into the single `Predict` entrypoint.

pub mod classifier;
pub mod domain;
pub mod enrichment;
pub mod fusion;
pub mod market;
pub mod orchestrator;
pub mod pipeline;
pub mod prompt;
pub mod trade;
