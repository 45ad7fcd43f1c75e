//! C3 PromptComposer — pure `(Event, ModelID, Dimension, EnrichmentContext?)
//! → PromptText` (spec.md §4.3). Never invokes models or the network.

use crate::core::classifier::Dimension;
use crate::core::domain::Event;

const RULES_CHAR_CAP: usize = 1_500;

/// Build the prompt text sent to a single model for a single outcome.
pub fn compose(event: &Event, outcome_name: &str, model_id: &str, dimension: Dimension) -> String {
    let rules = truncate(&event.rules, RULES_CHAR_CAP);
    let market_probability = event
        .outcomes
        .iter()
        .find(|o| o.name == outcome_name)
        .and_then(|o| o.market_probability)
        .map(|p| format!("{p:.1}%"))
        .unwrap_or_else(|| "unknown".to_string());
    let days = event
        .days_to_resolution(chrono::Utc::now())
        .map(|d| format!("{d:.1}"))
        .unwrap_or_else(|| "unknown".to_string());

    let mut prompt = String::new();
    prompt.push_str(&format!("Model: {model_id}\n"));
    prompt.push_str(&format!("Question: {}\n", event.question));
    if outcome_name != event.question {
        prompt.push_str(&format!("Outcome under evaluation: {outcome_name}\n"));
    }
    if !rules.is_empty() {
        prompt.push_str(&format!("Rules: {rules}\n"));
    }
    prompt.push_str(&format!("Current market probability: {market_probability}\n"));
    prompt.push_str(&format!("Days to resolution: {days}\n"));
    prompt.push_str(&format!(
        "Analytic dimension ({dimension}): {}\n",
        dimension.description()
    ));

    if let Some(ctx) = &event.enrichment_context {
        if let Some(temp) = ctx.world_temperature {
            prompt.push_str(&format!("World sentiment index: {temp:.2}\n"));
        }
        if let Some(news) = &ctx.news_summary {
            prompt.push_str(&format!("Recent news summary: {news}\n"));
        }
    }

    prompt.push_str(
        "\nRespond with a single JSON object and nothing else, matching this schema:\n\
         {\"probability\": <number 0-100>, \"confidence\": \"low\"|\"medium\"|\"high\", \
         \"reasoning\": \"<brief string>\"}\n",
    );

    prompt
}

fn truncate(text: &str, cap: usize) -> String {
    if text.chars().count() <= cap {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(cap).collect();
        format!("{truncated}…")
    }
}
