//! Low-probability diagnostic (spec.md §4.1, §5): flags events where
//! every reported market probability is vanishingly small, which is
//! usually a sign of stale or malformed market data rather than a
//! genuinely unlikely event.
//!
//! Candidates are drawn from `Outcome.MarketProbability` (spec.md §4.1's
//! candidate (b); single-outcome Polymarket-style events fold candidate
//! (a), the event-level price, into that same field since this domain
//! model has no separate event-level probability to read). Candidate
//! (c), a live order-book endpoint queried as a last resort when no
//! outcome carries a usable price, is not wired up: none of the three
//! `MarketSource`s expose order-book depth, and no production model for
//! one exists elsewhere in this crate to ground a new one on — see
//! `DESIGN.md`.

use crate::core::domain::{LowProbabilityNotice, Outcome};

/// Build a notice when the highest candidate probability across all
/// outcomes falls below `threshold`. Only candidates in `(0.0, 100.0]`
/// are considered — an outcome with no price, or a literal `0.0`, is
/// excluded rather than counted as evidence of a low-probability event,
/// so an event with zero priced outcomes never trips this diagnostic.
pub fn check(outcomes: &[Outcome], threshold: f64) -> Option<LowProbabilityNotice> {
    let max_candidate = outcomes
        .iter()
        .filter_map(|o| o.market_probability)
        .filter(|p| *p > 0.0 && *p <= 100.0)
        .fold(None, |acc: Option<f64>, p| Some(acc.map_or(p, |m| m.max(p))))?;

    if max_candidate < threshold {
        Some(LowProbabilityNotice {
            max_candidate,
            threshold,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_when_max_candidate_below_threshold() {
        let outcomes = vec![
            Outcome::new("Yes").with_market_probability(0.3),
            Outcome::new("No").with_market_probability(0.2),
        ];
        let notice = check(&outcomes, 1.0).unwrap();
        assert_eq!(notice.max_candidate, 0.3);
        assert_eq!(notice.threshold, 1.0);
    }

    #[test]
    fn does_not_flag_when_a_candidate_meets_threshold() {
        let outcomes = vec![
            Outcome::new("Yes").with_market_probability(0.3),
            Outcome::new("No").with_market_probability(45.0),
        ];
        assert!(check(&outcomes, 1.0).is_none());
    }

    #[test]
    fn zero_only_candidates_never_trigger() {
        let outcomes = vec![
            Outcome::new("Yes").with_market_probability(0.0),
            Outcome::new("No").with_market_probability(0.0),
        ];
        assert!(check(&outcomes, 1.0).is_none());
    }

    #[test]
    fn no_priced_outcomes_never_trigger() {
        let outcomes = vec![Outcome::new("Yes"), Outcome::new("No")];
        assert!(check(&outcomes, 1.0).is_none());
    }
}
