//! Fuzzy author-name matching.
//!
//! Links a free-text author name (typed by a user or taken from a
//! bibliographic record) to one of a list of researcher profiles.
//!
//! The pipeline has three stages:
//!
//! 1. [`normalize_author_name`] lowercases the name and strips academic
//!    titles, generational/degree suffixes and punctuation.
//! 2. [`calculate_name_similarity`] scores two normalized names in `[0, 1]`
//!    with token Jaccard similarity plus bonuses for matching first/last
//!    names, reordered tokens and shared middle names. Initials and common
//!    nicknames count as matching name parts.
//! 3. [`find_best_author_match`] picks the highest-scoring candidate above a
//!    threshold.
//!
//! [`AuthorMatcher`] bundles the three stages with a [`MatcherConfig`] so that
//! extra titles, suffixes and nicknames can be configured, and adds candidate
//! ranking and publication author linking on top.
//!
//! # Example
//!
//! ```
//! use rgm_match::find_best_author_match;
//! use rgm_model::Candidate;
//!
//! let candidates = vec![
//!     Candidate::new("1", "Dr. Jane Doe").unwrap(),
//!     Candidate::new("2", "J. Doe").unwrap(),
//! ];
//! let best = find_best_author_match("Jane M. Doe", &candidates, None).unwrap();
//! assert_eq!(best.author.id, "1");
//! ```

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod link;
pub mod matcher;
pub mod nickname;
pub mod normalize;
pub mod similarity;

pub use config::MatcherConfig;
pub use error::{ConfigError, Result};
pub use link::{AuthorLink, AuthorLinkReport, LinkMethod, link_publication_authors};
pub use matcher::{
    AuthorMatcher, ConfidenceLevel, ConfidenceThresholds, DEFAULT_THRESHOLD, RankedCandidate,
    find_best_author_match, rank_candidates,
};
pub use nickname::NicknameTable;
pub use normalize::{NameNormalizer, normalize_author_name};
pub use similarity::{NameScorer, ScoreComponent, SimilarityBreakdown, calculate_name_similarity};
