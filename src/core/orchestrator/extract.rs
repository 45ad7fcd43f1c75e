//! Tolerant extraction of the `{probability, confidence, reasoning}`
//! object from a model's free-form text response (spec.md §4.4).
//!
//! Models are asked to return bare JSON but routinely wrap it in prose
//! or markdown fences, so this scans for the first balanced-brace
//! object rather than requiring the whole response to parse cleanly.

use serde::{Deserialize, Deserializer};

use crate::core::domain::Confidence;
use crate::error::{Error, Result};

/// Reasoning strings are truncated to this many characters on ingestion
/// (spec.md §6's wire-format rule) so one verbose model can't dominate
/// fusion summaries or logs.
const MAX_REASONING_CHARS: usize = 200;

fn truncate_reasoning(reasoning: String) -> String {
    if reasoning.chars().count() <= MAX_REASONING_CHARS {
        reasoning
    } else {
        reasoning.chars().take(MAX_REASONING_CHARS).collect()
    }
}

/// `probability` is coerced from a string if needed (spec.md §6's
/// wire-format rule) — models routinely quote the number even when asked
/// for bare JSON.
fn probability_from_number_or_string<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Deserialize)]
struct RawPayload {
    #[serde(deserialize_with = "probability_from_number_or_string")]
    probability: f64,
    #[serde(default)]
    confidence: Option<String>,
    #[serde(default)]
    reasoning: Option<String>,
}

pub struct Extracted {
    pub probability: f64,
    pub confidence: Confidence,
    pub reasoning: String,
}

/// Find the first balanced `{ ... }` substring in `text` and parse it.
fn first_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let bytes = text.as_bytes();
    let mut depth = 0i32;
    for (i, &b) in bytes.iter().enumerate().skip(start) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Extract a model response payload from free-form text.
pub fn extract(text: &str) -> Result<Extracted> {
    let object = first_balanced_object(text)
        .ok_or_else(|| Error::Invariant("no JSON object found in model response".to_string()))?;

    let raw: RawPayload = serde_json::from_str(object)?;

    if !raw.probability.is_finite() || !(0.0..=100.0).contains(&raw.probability) {
        return Err(Error::Invariant(format!(
            "model reported out-of-range probability: {}",
            raw.probability
        )));
    }

    Ok(Extracted {
        probability: raw.probability,
        confidence: raw
            .confidence
            .as_deref()
            .map(Confidence::parse_lenient)
            .unwrap_or(Confidence::Medium),
        reasoning: truncate_reasoning(raw.reasoning.unwrap_or_default()),
    })
}
