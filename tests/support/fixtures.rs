use marketcast::core::domain::{Category, Event, FamilyType, Outcome};

/// Build an event with the given outcomes (name, market probability),
/// ready to be run through the classifier the way `MarketGateway` hands
/// one off to C2.
pub fn event_with_outcomes(question: &str, outcomes: Vec<(&str, f64)>) -> Event {
    Event {
        question: question.to_string(),
        rules: String::new(),
        market_slug: None,
        market_id: None,
        resolution_date: None,
        outcomes: outcomes
            .into_iter()
            .map(|(name, market)| Outcome::new(name).with_market_probability(market))
            .collect(),
        family_type: FamilyType::Binary,
        category: Category::Other,
        classification_reason: String::new(),
        enrichment_context: None,
        is_mock: false,
    }
}
