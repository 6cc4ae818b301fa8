//! Best-match selection, ranking and confidence levels.

use std::cmp::Ordering;

use rapidfuzz::distance::jaro_winkler::similarity as jaro_similarity;
use rgm_model::{AuthorMatch, Candidate};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::MatcherConfig;
use crate::error::Result;
use crate::nickname::NicknameTable;
use crate::normalize::NameNormalizer;
use crate::similarity::{NameScorer, SimilarityBreakdown};

/// Threshold used when the caller does not pass one.
pub const DEFAULT_THRESHOLD: f64 = 0.85;

/// Pick the candidate whose name best matches `input_name`.
///
/// Returns `None` when no candidate scores strictly above `threshold`
/// (default [`DEFAULT_THRESHOLD`]). Equal scores keep the earlier candidate.
pub fn find_best_author_match(
    input_name: &str,
    candidates: &[Candidate],
    threshold: Option<f64>,
) -> Option<AuthorMatch> {
    AuthorMatcher::default().find_best_with_threshold(
        input_name,
        candidates,
        threshold.unwrap_or(DEFAULT_THRESHOLD),
    )
}

/// Score and sort every candidate, best first.
///
/// See [`AuthorMatcher::rank`].
pub fn rank_candidates(
    input_name: &str,
    candidates: &[Candidate],
    limit: Option<usize>,
) -> Vec<RankedCandidate> {
    AuthorMatcher::default().rank(input_name, candidates, limit)
}

/// Confidence level categories for match quality.
///
/// - `High`: near-certain, safe to link without review
/// - `Medium`: plausible, should be confirmed
/// - `Low`: weak, only useful as a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::High => "high confidence - likely the same person",
            Self::Medium => "medium confidence - should review",
            Self::Low => "low confidence - manual verification needed",
        }
    }
}

/// Score boundaries between confidence levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfidenceThresholds {
    /// Minimum score for high confidence (default: 0.95).
    pub high: f64,
    /// Minimum score for medium confidence (default: 0.85).
    pub medium: f64,
    /// Minimum score to be reported at all (default: 0.60).
    pub low: f64,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            high: 0.95,
            medium: DEFAULT_THRESHOLD,
            low: 0.60,
        }
    }
}

impl ConfidenceThresholds {
    /// Returns `None` if the score is below the low threshold.
    #[must_use]
    pub fn categorize(&self, score: f64) -> Option<ConfidenceLevel> {
        if score >= self.high {
            Some(ConfidenceLevel::High)
        } else if score >= self.medium {
            Some(ConfidenceLevel::Medium)
        } else if score >= self.low {
            Some(ConfidenceLevel::Low)
        } else {
            None
        }
    }
}

/// A candidate with its score against an input name.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    pub candidate: Candidate,
    pub normalized_name: String,
    pub score: f64,
    /// Jaro-Winkler similarity of the normalized names; orders equal scores.
    pub tiebreak: f64,
    pub level: Option<ConfidenceLevel>,
}

/// Normalizer, scorer and thresholds configured together.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorMatcher {
    normalizer: NameNormalizer,
    scorer: NameScorer,
    threshold: f64,
    levels: ConfidenceThresholds,
}

impl Default for AuthorMatcher {
    fn default() -> Self {
        Self {
            normalizer: NameNormalizer::default(),
            scorer: NameScorer::default(),
            threshold: DEFAULT_THRESHOLD,
            levels: ConfidenceThresholds::default(),
        }
    }
}

impl AuthorMatcher {
    /// Build a matcher from a validated configuration.
    pub fn from_config(config: &MatcherConfig) -> Result<Self> {
        config.validate()?;

        let normalizer = NameNormalizer::new()
            .with_titles(&config.extra_titles)
            .with_suffixes(&config.extra_suffixes);
        let mut nicknames = NicknameTable::new();
        for (formal, informal) in &config.nicknames {
            nicknames.insert(formal, informal);
        }

        debug!(
            threshold = config.threshold,
            extra_titles = config.extra_titles.len(),
            extra_suffixes = config.extra_suffixes.len(),
            nickname_entries = config.nicknames.len(),
            "author matcher configured"
        );

        Ok(Self {
            normalizer,
            scorer: NameScorer::new(nicknames),
            threshold: config.threshold,
            levels: config.thresholds,
        })
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn levels(&self) -> &ConfidenceThresholds {
        &self.levels
    }

    pub fn normalize(&self, name: &str) -> String {
        self.normalizer.normalize(name)
    }

    /// Score two raw names (both are normalized first).
    pub fn score_names(&self, name_a: &str, name_b: &str) -> f64 {
        self.explain_names(name_a, name_b).score()
    }

    /// Score breakdown for two raw names.
    pub fn explain_names(&self, name_a: &str, name_b: &str) -> SimilarityBreakdown {
        self.scorer
            .breakdown(&self.normalize(name_a), &self.normalize(name_b))
    }

    /// Score already-normalized names.
    pub fn similarity(&self, normalized_a: &str, normalized_b: &str) -> f64 {
        self.scorer.similarity(normalized_a, normalized_b)
    }

    /// Best candidate above the configured threshold.
    pub fn find_best(&self, input_name: &str, candidates: &[Candidate]) -> Option<AuthorMatch> {
        self.find_best_with_threshold(input_name, candidates, self.threshold)
    }

    /// Best candidate strictly above `threshold`; the first of equal maxima wins.
    pub fn find_best_with_threshold(
        &self,
        input_name: &str,
        candidates: &[Candidate],
        threshold: f64,
    ) -> Option<AuthorMatch> {
        let normalized_input = self.normalize(input_name);
        let mut best: Option<&Candidate> = None;
        let mut best_score = threshold;

        for candidate in candidates {
            let score = self
                .scorer
                .similarity(&normalized_input, &self.normalize(&candidate.name));
            trace!(candidate = %candidate.id, score, "scored candidate");
            if score > best_score {
                best = Some(candidate);
                best_score = score;
            }
        }

        match best {
            Some(candidate) => {
                debug!(
                    candidate = %candidate.id,
                    score = best_score,
                    threshold,
                    "author matched"
                );
                Some(AuthorMatch {
                    author: candidate.clone(),
                    score: best_score,
                })
            }
            None => {
                debug!(
                    candidates = candidates.len(),
                    threshold, "no candidate above threshold"
                );
                None
            }
        }
    }

    /// Score every candidate and sort best first.
    ///
    /// Equal scores are ordered by Jaro-Winkler similarity of the normalized
    /// names, then by input order. `limit` truncates the result.
    pub fn rank(
        &self,
        input_name: &str,
        candidates: &[Candidate],
        limit: Option<usize>,
    ) -> Vec<RankedCandidate> {
        let normalized_input = self.normalize(input_name);
        let mut ranked: Vec<RankedCandidate> = candidates
            .iter()
            .map(|candidate| {
                let normalized_name = self.normalize(&candidate.name);
                let score = self.scorer.similarity(&normalized_input, &normalized_name);
                let tiebreak = jaro_similarity(normalized_input.chars(), normalized_name.chars());
                RankedCandidate {
                    candidate: candidate.clone(),
                    normalized_name,
                    score,
                    tiebreak,
                    level: self.levels.categorize(score),
                }
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.tiebreak.partial_cmp(&a.tiebreak).unwrap_or(Ordering::Equal))
        });
        if let Some(limit) = limit {
            ranked.truncate(limit);
        }
        ranked
    }
}
