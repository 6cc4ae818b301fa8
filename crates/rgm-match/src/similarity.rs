//! Similarity scoring between two normalized names.
//!
//! The score is token Jaccard similarity plus fixed bonuses, capped at 1.0:
//!
//! | component       | bonus | applies when                                         |
//! |-----------------|-------|------------------------------------------------------|
//! | first name      | 0.2   | first tokens part-match                              |
//! | last name       | 0.2   | last tokens part-match                               |
//! | reordered       | 0.1   | same tokens (≥ 2) in a different order               |
//! | middle name     | 0.1   | both have ≥ 3 tokens and some middle tokens part-match |
//!
//! Two tokens part-match when they are equal, when one is an initial of the
//! other, or when one is a nickname of the other.

use std::collections::BTreeSet;

use crate::nickname::NicknameTable;

const FIRST_NAME_BONUS: f64 = 0.2;
const LAST_NAME_BONUS: f64 = 0.2;
const REORDER_BONUS: f64 = 0.1;
const MIDDLE_NAME_BONUS: f64 = 0.1;

/// Score two normalized names with the built-in nickname table.
pub fn calculate_name_similarity(normalized_a: &str, normalized_b: &str) -> f64 {
    NameScorer::default().similarity(normalized_a, normalized_b)
}

/// A bonus contributing to the final score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreComponent {
    /// Component name (e.g., "Last name").
    pub name: &'static str,
    pub value: f64,
    /// Human-readable description.
    pub description: String,
}

/// How a similarity score was put together.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityBreakdown {
    /// Token-set Jaccard similarity (1.0 for identical strings).
    pub jaccard: f64,
    /// Bonuses in the order they were applied.
    pub components: Vec<ScoreComponent>,
}

impl SimilarityBreakdown {
    fn zero() -> Self {
        Self {
            jaccard: 0.0,
            components: Vec::new(),
        }
    }

    fn identical() -> Self {
        Self {
            jaccard: 1.0,
            components: Vec::new(),
        }
    }

    /// Jaccard plus all bonuses, before capping.
    #[must_use]
    pub fn raw_total(&self) -> f64 {
        self.components
            .iter()
            .fold(self.jaccard, |total, component| total + component.value)
    }

    /// Final score in `[0, 1]`.
    #[must_use]
    pub fn score(&self) -> f64 {
        self.raw_total().min(1.0)
    }

    /// Human-readable explanation of the score.
    pub fn explain(&self) -> String {
        let mut parts = vec![format!("Token overlap: {:.0}%", self.jaccard * 100.0)];
        parts.extend(
            self.components
                .iter()
                .map(|c| format!("{}: +{:.0}%", c.name, c.value * 100.0)),
        );
        parts.join("; ")
    }
}

/// Scores normalized names against a nickname table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameScorer {
    nicknames: NicknameTable,
}

impl NameScorer {
    pub fn new(nicknames: NicknameTable) -> Self {
        Self { nicknames }
    }

    pub fn nicknames(&self) -> &NicknameTable {
        &self.nicknames
    }

    /// Score in `[0, 1]`; 0 when either name is empty, 1 when both are equal.
    pub fn similarity(&self, normalized_a: &str, normalized_b: &str) -> f64 {
        self.breakdown(normalized_a, normalized_b).score()
    }

    /// Score with the contributing components.
    pub fn breakdown(&self, normalized_a: &str, normalized_b: &str) -> SimilarityBreakdown {
        if normalized_a.is_empty() || normalized_b.is_empty() {
            return SimilarityBreakdown::zero();
        }
        if normalized_a == normalized_b {
            return SimilarityBreakdown::identical();
        }

        let tokens_a = name_tokens(normalized_a);
        let tokens_b = name_tokens(normalized_b);
        let (Some(first_a), Some(first_b), Some(last_a), Some(last_b)) = (
            tokens_a.first(),
            tokens_b.first(),
            tokens_a.last(),
            tokens_b.last(),
        ) else {
            return SimilarityBreakdown::zero();
        };

        let mut components = Vec::new();

        if self.parts_match(first_a, first_b) {
            components.push(ScoreComponent {
                name: "First name",
                value: FIRST_NAME_BONUS,
                description: format!("'{first_a}' ~ '{first_b}'"),
            });
        }

        if self.parts_match(last_a, last_b) {
            components.push(ScoreComponent {
                name: "Last name",
                value: LAST_NAME_BONUS,
                description: format!("'{last_a}' ~ '{last_b}'"),
            });
        }

        if is_reordering(&tokens_a, &tokens_b) {
            components.push(ScoreComponent {
                name: "Reordered",
                value: REORDER_BONUS,
                description: "Same name parts in a different order".into(),
            });
        }

        if let Some((middle_a, middle_b)) = self.matching_middle(&tokens_a, &tokens_b) {
            components.push(ScoreComponent {
                name: "Middle name",
                value: MIDDLE_NAME_BONUS,
                description: format!("'{middle_a}' ~ '{middle_b}'"),
            });
        }

        SimilarityBreakdown {
            jaccard: jaccard(&tokens_a, &tokens_b),
            components,
        }
    }

    /// Equal, initial-of, or nickname-of.
    fn parts_match(&self, a: &str, b: &str) -> bool {
        if a == b {
            return true;
        }
        if (is_initial(a) && b.starts_with(a)) || (is_initial(b) && a.starts_with(b)) {
            return true;
        }
        self.nicknames.are_equivalent(a, b)
    }

    fn matching_middle<'a>(
        &self,
        tokens_a: &'a [String],
        tokens_b: &'a [String],
    ) -> Option<(&'a str, &'a str)> {
        if tokens_a.len() < 3 || tokens_b.len() < 3 {
            return None;
        }
        let middle_a = &tokens_a[1..tokens_a.len() - 1];
        let middle_b = &tokens_b[1..tokens_b.len() - 1];
        middle_a.iter().find_map(|a| {
            middle_b
                .iter()
                .find(|b| self.parts_match(a, b))
                .map(|b| (a.as_str(), b.as_str()))
        })
    }
}

/// Split a normalized name into comparable tokens.
///
/// Hyphens are dropped inside tokens (`jean-paul` → `jeanpaul`) and a lone
/// letter with an optional trailing period becomes the bare initial.
fn name_tokens(normalized: &str) -> Vec<String> {
    normalized
        .split_whitespace()
        .map(|token| {
            let joined = token.replace('-', "");
            let mut chars = joined.chars();
            match (chars.next(), chars.next(), chars.next()) {
                (Some(initial), Some('.'), None) if initial.is_alphabetic() => initial.to_string(),
                _ => joined,
            }
        })
        .filter(|token| !token.is_empty())
        .collect()
}

fn is_initial(token: &str) -> bool {
    let mut chars = token.chars();
    chars.next().is_some() && chars.next().is_none()
}

fn jaccard(tokens_a: &[String], tokens_b: &[String]) -> f64 {
    let set_a: BTreeSet<&str> = tokens_a.iter().map(String::as_str).collect();
    let set_b: BTreeSet<&str> = tokens_b.iter().map(String::as_str).collect();
    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

fn is_reordering(tokens_a: &[String], tokens_b: &[String]) -> bool {
    if tokens_a.len() != tokens_b.len() || tokens_a.len() < 2 || tokens_a == tokens_b {
        return false;
    }
    let mut sorted_a = tokens_a.to_vec();
    let mut sorted_b = tokens_b.to_vec();
    sorted_a.sort();
    sorted_b.sort();
    sorted_a == sorted_b
}
