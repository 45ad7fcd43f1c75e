//! Builds the human-readable `FusedOutcome.summary` from per-model
//! reasoning text (spec.md §4.5), deduplicating near-identical
//! explanations so the same argument isn't repeated once per model.

use std::collections::HashSet;

/// Jaccard similarity over lowercased word sets; cheap and good enough
/// to catch models that restate each other's reasoning near-verbatim.
fn word_overlap_similarity(a: &str, b: &str) -> f64 {
    let words_of = |s: &str| -> HashSet<String> {
        s.to_ascii_lowercase()
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
            .filter(|w| !w.is_empty())
            .collect()
    };
    let a_words = words_of(a);
    let b_words = words_of(b);
    if a_words.is_empty() || b_words.is_empty() {
        return 0.0;
    }
    let intersection = a_words.intersection(&b_words).count() as f64;
    let union = a_words.union(&b_words).count() as f64;
    intersection / union
}

/// Combine per-model reasoning strings into one summary, dropping any
/// entry whose similarity to an already-kept entry exceeds `threshold`.
pub fn build_summary(reasonings: &[String], threshold: f64) -> String {
    let mut kept: Vec<&str> = Vec::new();

    for reasoning in reasonings {
        let trimmed = reasoning.trim();
        if trimmed.is_empty() {
            continue;
        }
        let is_duplicate = kept
            .iter()
            .any(|existing| word_overlap_similarity(existing, trimmed) >= threshold);
        if !is_duplicate {
            kept.push(trimmed);
        }
    }

    if kept.is_empty() {
        return "no model reasoning available".to_string();
    }

    kept.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deduplicates_near_identical_reasoning() {
        let reasonings = vec![
            "Historical base rates favor yes.".to_string(),
            "Historical base rates strongly favor yes.".to_string(),
        ];
        let summary = build_summary(&reasonings, 0.6);
        assert_eq!(summary.matches("base rates").count(), 1);
    }

    #[test]
    fn keeps_genuinely_different_reasoning() {
        let reasonings = vec![
            "Polling shows a clear lead.".to_string(),
            "Recent court ruling changes the calculus entirely.".to_string(),
        ];
        let summary = build_summary(&reasonings, 0.6);
        assert!(summary.contains("Polling"));
        assert!(summary.contains("court ruling"));
    }

    #[test]
    fn empty_input_has_a_fallback_summary() {
        assert_eq!(build_summary(&[], 0.6), "no model reasoning available");
    }

    #[test]
    fn blank_entries_are_skipped() {
        let reasonings = vec!["   ".to_string(), "Solid reasoning here.".to_string()];
        let summary = build_summary(&reasonings, 0.6);
        assert_eq!(summary, "Solid reasoning here.");
    }
}
