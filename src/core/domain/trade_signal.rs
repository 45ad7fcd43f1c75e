//! `TradeSignal` — C6 output (spec.md §3, §4.6).

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Hold,
    Sell,
}

#[derive(Debug, Clone, Serialize)]
pub struct TradeSignal {
    pub signal: Signal,
    pub ev: f64,
    pub annualized_ev: f64,
    pub risk_factor: f64,
    pub reason: String,
}
