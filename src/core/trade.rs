//! C6 TradeSignalEvaluator (spec.md §4.6): turns a fused outcome and its
//! market price into a BUY/HOLD/SELL recommendation. Purely a function
//! of already-computed values — no network, no model calls.

use crate::app::config::TradeParams;
use crate::core::domain::{FusedOutcome, Signal, TradeSignal};

/// Evaluate a trade signal for one outcome. Returns `None` when there is
/// no market price to compare against, or fusion produced no model-only
/// probability — there is nothing to trade against in either case.
pub fn evaluate(
    fused: &FusedOutcome,
    market_probability: Option<f64>,
    days_to_resolution: Option<f64>,
    params: &TradeParams,
) -> Option<TradeSignal> {
    let market = market_probability?;
    let model_only = fused.model_only_prob?;

    let ev = model_only - market;
    // AnnualizedEV = EV * (365 / max(DaysToResolution, 1)) (spec.md §4.6).
    // A missing resolution date is treated the same as `0` days out: the
    // denominator still clamps to 1, so the annualized figure never
    // divides by less than a full day.
    let annualized_ev = ev * (365.0 / days_to_resolution.unwrap_or(0.0).max(1.0));
    let days_component = days_to_resolution.unwrap_or(0.0).max(0.0).min(365.0) / 730.0;
    let risk_factor = (fused.uncertainty / 10.0 + days_component).clamp(0.0, 1.0);

    let (signal, reason) = if risk_factor >= params.risk_ceiling {
        (
            Signal::Sell,
            format!(
                "risk factor ({risk_factor:.2}) at or above the risk ceiling ({:.2}); selling regardless of edge",
                params.risk_ceiling
            ),
        )
    } else if ev < -params.ev_sell_threshold {
        (
            Signal::Sell,
            format!(
                "model consensus ({model_only:.1}%) trails market price ({market:.1}%) by {:.1} points",
                ev.abs()
            ),
        )
    } else if ev > params.ev_buy_threshold && risk_factor < params.risk_threshold {
        (
            Signal::Buy,
            format!(
                "positive EV (+{ev:.2}) with low risk ({risk_factor:.2})"
            ),
        )
    } else {
        (
            Signal::Hold,
            format!("edge ({ev:.1} points) or risk ({risk_factor:.2}) does not clear trade thresholds"),
        )
    };

    Some(TradeSignal {
        signal,
        ev,
        annualized_ev,
        risk_factor,
        reason,
    })
}
