//! Trade-signal thresholds (spec.md §4.6, §6).

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TradeParams {
    pub ev_buy_threshold: f64,
    pub ev_sell_threshold: f64,
    pub risk_threshold: f64,
    pub risk_ceiling: f64,
}

impl Default for TradeParams {
    fn default() -> Self {
        Self {
            ev_buy_threshold: 2.0,
            ev_sell_threshold: 2.0,
            risk_threshold: 0.6,
            risk_ceiling: 0.9,
        }
    }
}
