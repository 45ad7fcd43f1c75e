//! C2 EventClassifier — pure `Event → (Category, FamilyType, Dimensions)`
//! (spec.md §4.2).
//!
//! The exact heuristic for distinguishing `mutually_exclusive` from
//! `conditional` is ambiguous in the distilled spec (§9's open question);
//! this module externalizes it as a small ordered rules table rather than
//! nested `if`/`else`, and records the deciding rule on `Event`.

use std::fmt;

use itertools::Itertools;

use crate::core::domain::{Category, Event, FamilyType, Outcome};

/// A fixed registry of analytic viewpoints a model may be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    StatisticalBaseRate,
    QualitativeRisk,
    PatternMatch,
    PolicyDomain,
    NarrativeContext,
}

impl Dimension {
    const ALL: [Dimension; 5] = [
        Dimension::StatisticalBaseRate,
        Dimension::QualitativeRisk,
        Dimension::PatternMatch,
        Dimension::PolicyDomain,
        Dimension::NarrativeContext,
    ];

    pub fn description(self) -> &'static str {
        match self {
            Dimension::StatisticalBaseRate => {
                "Ground your estimate in historical base rates for similar events."
            }
            Dimension::QualitativeRisk => {
                "Weigh qualitative risks and tail scenarios that base rates miss."
            }
            Dimension::PatternMatch => {
                "Compare this event to structurally similar past events and their outcomes."
            }
            Dimension::PolicyDomain => {
                "Reason from the specific institutional/policy mechanics that govern resolution."
            }
            Dimension::NarrativeContext => {
                "Weigh the current narrative and momentum around this question."
            }
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Dimension::StatisticalBaseRate => "statistical-base-rate",
            Dimension::QualitativeRisk => "qualitative-risk",
            Dimension::PatternMatch => "pattern-match",
            Dimension::PolicyDomain => "policy-domain",
            Dimension::NarrativeContext => "narrative-context",
        };
        f.write_str(s)
    }
}

/// Assigns each configured model ID a `Dimension`, deterministically given
/// `(category, model list)`. Model IDs are sorted lexicographically before
/// assignment so ties are broken consistently.
pub fn assign_dimensions(category: Category, model_ids: &[String]) -> Vec<(String, Dimension)> {
    // The category perturbs the starting offset so different categories
    // don't always hand the first model the same dimension.
    let offset = category as usize;

    model_ids
        .iter()
        .sorted()
        .enumerate()
        .map(|(i, id)| (id.clone(), Dimension::ALL[(i + offset) % Dimension::ALL.len()]))
        .collect()
}

struct Rule {
    name: &'static str,
    matches: fn(&[Outcome]) -> bool,
    family: FamilyType,
}

fn looks_conditional(outcomes: &[Outcome]) -> bool {
    const DATE_PATTERNS: [&str; 3] = ["by ", "on ", "before "];
    const RANGE_MARKERS: [char; 2] = ['-', '–'];

    outcomes.iter().any(|o| {
        let lower = o.name.to_ascii_lowercase();
        DATE_PATTERNS.iter().any(|p| lower.contains(p))
            || RANGE_MARKERS.iter().any(|c| o.name.contains(*c))
            || o.derived_group_key.is_some()
    })
}

fn looks_mutually_exclusive(outcomes: &[Outcome]) -> bool {
    if outcomes.len() < 2 {
        return false;
    }
    let active: Vec<f64> = outcomes
        .iter()
        .filter(|o| o.active)
        .filter_map(|o| o.market_probability)
        .collect();
    if active.len() < 2 {
        return false;
    }
    let sum: f64 = active.iter().sum();
    (80.0..=120.0).contains(&sum)
}

fn rules() -> [Rule; 3] {
    [
        Rule {
            name: "single or complementary outcome set is binary",
            matches: |outcomes| outcomes.len() == 1 || outcomes.len() == 2,
            family: FamilyType::Binary,
        },
        Rule {
            name: "date/range/group-keyed outcome names indicate a conditional series",
            matches: looks_conditional,
            family: FamilyType::Conditional,
        },
        Rule {
            name: "active market probabilities sum near 100 across competing outcomes",
            matches: looks_mutually_exclusive,
            family: FamilyType::MutuallyExclusive,
        },
    ]
}

/// Classify an event's family type, returning the chosen family plus a
/// human-readable reason for the decision (surfaced on `Event` for later
/// tuning, per the open question in spec.md §9).
pub fn classify_family(outcomes: &[Outcome]) -> (FamilyType, String) {
    for rule in rules() {
        if (rule.matches)(outcomes) {
            return (rule.family, rule.name.to_string());
        }
    }
    (
        FamilyType::Hybrid,
        "no classification rule matched; defaulting to hybrid (treated as conditional)".to_string(),
    )
}

/// Best-effort topical classification from the event's question text.
/// Pure keyword matching; conservative default of `Other`.
pub fn classify_category(question: &str) -> Category {
    let lower = question.to_ascii_lowercase();
    const POLITICS: [&str; 6] = ["election", "president", "senate", "congress", "governor", "vote"];
    const GEOPOLITICS: [&str; 5] = ["war", "nato", "treaty", "border", "invasion"];
    const ECONOMY: [&str; 6] = ["inflation", "fed", "rate", "gdp", "recession", "unemployment"];
    const TECHNOLOGY: [&str; 5] = ["ai", "chip", "launch", "software", "release"];
    const SPORTS: [&str; 5] = ["championship", "playoff", "match", "tournament", "season"];
    const ENTERTAINMENT: [&str; 4] = ["movie", "album", "award", "box office"];

    let hits = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

    if hits(&POLITICS) {
        Category::Politics
    } else if hits(&GEOPOLITICS) {
        Category::Geopolitics
    } else if hits(&ECONOMY) {
        Category::Economy
    } else if hits(&TECHNOLOGY) {
        Category::Technology
    } else if hits(&SPORTS) {
        Category::Sports
    } else if hits(&ENTERTAINMENT) {
        Category::Entertainment
    } else {
        Category::Other
    }
}

/// Classify a fully-resolved event in place, filling `category`,
/// `family_type`, and `classification_reason`.
pub fn classify(event: &mut Event) {
    event.category = classify_category(&event.question);
    let (family, reason) = classify_family(&event.outcomes);
    event.family_type = family;
    event.classification_reason = reason;
}
