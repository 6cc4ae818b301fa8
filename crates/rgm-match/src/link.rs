//! Linking publication authors to researcher profiles.
//!
//! Each author is linked to at most one candidate and each candidate to at
//! most one author. ORCID identifiers are authoritative: equal ORCIDs link
//! before any name is compared, and two different ORCIDs never link.
//! Remaining pairs are assigned greedily by descending name score.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use rgm_model::{Candidate, PublicationAuthor, PublicationMetadata, normalize_orcid};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matcher::{AuthorMatcher, DEFAULT_THRESHOLD};

/// How an author was linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkMethod {
    Orcid,
    Name,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorLink {
    /// Position of the author in the publication's author list.
    pub author_position: usize,
    pub author_name: String,
    pub candidate: Candidate,
    pub score: f64,
    pub method: LinkMethod,
}

/// Result of linking one publication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorLinkReport {
    pub doi: String,
    /// Links ordered by author position.
    pub links: Vec<AuthorLink>,
    /// Positions of authors without a link (organizations included).
    pub unlinked: Vec<usize>,
}

impl AuthorLinkReport {
    pub fn link_for(&self, author_position: usize) -> Option<&AuthorLink> {
        self.links
            .iter()
            .find(|link| link.author_position == author_position)
    }
}

struct PairScore {
    author: usize,
    candidate: usize,
    score: f64,
}

/// Link authors with the default matcher.
pub fn link_publication_authors(
    publication: &PublicationMetadata,
    candidates: &[Candidate],
    threshold: Option<f64>,
) -> AuthorLinkReport {
    AuthorMatcher::default()
        .with_threshold(threshold.unwrap_or(DEFAULT_THRESHOLD))
        .link_publication(publication, candidates)
}

impl AuthorMatcher {
    /// Link publication authors to candidates one-to-one.
    pub fn link_publication(
        &self,
        publication: &PublicationMetadata,
        candidates: &[Candidate],
    ) -> AuthorLinkReport {
        let authors = &publication.authors;
        let mut linked_authors = BTreeSet::new();
        let mut linked_candidates = BTreeSet::new();
        let mut links = Vec::new();

        for (a_idx, author) in authors.iter().enumerate() {
            let Some(author_orcid) = author.orcid.as_deref().and_then(normalize_orcid) else {
                continue;
            };
            let found = candidates.iter().enumerate().find(|(c_idx, candidate)| {
                !linked_candidates.contains(c_idx)
                    && candidate.orcid.as_deref().and_then(normalize_orcid).as_deref()
                        == Some(author_orcid.as_str())
            });
            if let Some((c_idx, candidate)) = found {
                linked_authors.insert(a_idx);
                linked_candidates.insert(c_idx);
                links.push(new_link(author, candidate, 1.0, LinkMethod::Orcid));
            }
        }

        let normalized_candidates: Vec<String> = candidates
            .iter()
            .map(|candidate| self.normalize(&candidate.name))
            .collect();

        let mut pairs = Vec::new();
        for (a_idx, author) in authors.iter().enumerate() {
            if author.is_organization || linked_authors.contains(&a_idx) {
                continue;
            }
            let normalized_author = self.normalize(&author.name);
            for (c_idx, candidate) in candidates.iter().enumerate() {
                if linked_candidates.contains(&c_idx) || orcids_conflict(author, candidate) {
                    continue;
                }
                let score = self.similarity(&normalized_author, &normalized_candidates[c_idx]);
                if score > self.threshold() {
                    pairs.push(PairScore {
                        author: a_idx,
                        candidate: c_idx,
                        score,
                    });
                }
            }
        }

        // Stable sort: equal scores keep author order, then candidate order.
        pairs.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        for pair in pairs {
            if linked_authors.contains(&pair.author) || linked_candidates.contains(&pair.candidate) {
                continue;
            }
            linked_authors.insert(pair.author);
            linked_candidates.insert(pair.candidate);
            links.push(new_link(
                &authors[pair.author],
                &candidates[pair.candidate],
                pair.score,
                LinkMethod::Name,
            ));
        }

        links.sort_by_key(|link| link.author_position);
        let unlinked: Vec<usize> = authors
            .iter()
            .enumerate()
            .filter(|(a_idx, _)| !linked_authors.contains(a_idx))
            .map(|(_, author)| author.position)
            .collect();

        debug!(
            doi = %publication.doi,
            authors = authors.len(),
            linked = links.len(),
            unlinked = unlinked.len(),
            "publication authors linked"
        );

        AuthorLinkReport {
            doi: publication.doi.clone(),
            links,
            unlinked,
        }
    }
}

fn new_link(
    author: &PublicationAuthor,
    candidate: &Candidate,
    score: f64,
    method: LinkMethod,
) -> AuthorLink {
    AuthorLink {
        author_position: author.position,
        author_name: author.name.clone(),
        candidate: candidate.clone(),
        score,
        method,
    }
}

fn orcids_conflict(author: &PublicationAuthor, candidate: &Candidate) -> bool {
    let author_orcid = author.orcid.as_deref().and_then(normalize_orcid);
    let candidate_orcid = candidate.orcid.as_deref().and_then(normalize_orcid);
    matches!((author_orcid, candidate_orcid), (Some(a), Some(c)) if a != c)
}
