//! Researcher candidates and match results.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// A researcher profile that an author name may be matched against.
///
/// Candidates are held only for the duration of a match call; the caller
/// owns persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Profile identifier (database key, slug, ...).
    pub id: String,
    /// Display name as stored on the profile.
    pub name: String,
    /// Optional institutional affiliation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<String>,
    /// Bare ORCID identifier (`0000-0002-1825-0097`), if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orcid: Option<String>,
}

impl Candidate {
    /// Create a candidate, rejecting blank identifiers.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let id = id.into().trim().to_string();
        if id.is_empty() {
            return Err(ModelError::EmptyCandidateId);
        }
        Ok(Self {
            id,
            name: name.into(),
            affiliation: None,
            orcid: None,
        })
    }

    #[must_use]
    pub fn with_affiliation(mut self, affiliation: impl Into<String>) -> Self {
        self.affiliation = Some(affiliation.into());
        self
    }

    #[must_use]
    pub fn with_orcid(mut self, orcid: impl Into<String>) -> Self {
        self.orcid = Some(orcid.into());
        self
    }
}

/// The candidate chosen for an input name, with its similarity score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorMatch {
    pub author: Candidate,
    /// Similarity in `[0, 1]`.
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_and_rejects_blank_id() {
        let candidate = Candidate::new("  42 ", "Jane Doe").unwrap();
        assert_eq!(candidate.id, "42");
        assert_eq!(Candidate::new("   ", "Jane Doe"), Err(ModelError::EmptyCandidateId));
    }

    #[test]
    fn builders_set_optional_fields() {
        let candidate = Candidate::new("1", "Jane Doe")
            .unwrap()
            .with_affiliation("Utrecht University")
            .with_orcid("0000-0002-1825-0097");
        assert_eq!(candidate.affiliation.as_deref(), Some("Utrecht University"));
        assert_eq!(candidate.orcid.as_deref(), Some("0000-0002-1825-0097"));
    }
}
