//! Publication metadata normalized from DOI registration agencies.
//!
//! Crossref and DataCite describe the same work with different JSON shapes.
//! Both are decoded into [`PublicationMetadata`] so that the rest of the
//! system (author linking, profile pages) never sees a registry-specific type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Registry a record was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataSource {
    Crossref,
    DataCite,
    /// Primary record completed with fields from a second registry.
    Merged,
}

impl fmt::Display for MetadataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Crossref => write!(f, "Crossref"),
            Self::DataCite => write!(f, "DataCite"),
            Self::Merged => write!(f, "Crossref+DataCite"),
        }
    }
}

/// Coarse publication type shared by both registries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationKind {
    JournalArticle,
    ConferencePaper,
    BookChapter,
    Book,
    Dataset,
    Preprint,
    Thesis,
    Report,
    Software,
    #[default]
    Other,
}

impl PublicationKind {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::JournalArticle => "Journal article",
            Self::ConferencePaper => "Conference paper",
            Self::BookChapter => "Book chapter",
            Self::Book => "Book",
            Self::Dataset => "Dataset",
            Self::Preprint => "Preprint",
            Self::Thesis => "Thesis",
            Self::Report => "Report",
            Self::Software => "Software",
            Self::Other => "Other",
        }
    }
}

/// A possibly partial calendar date; registries often only know the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PublicationDate {
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u8>,
}

impl PublicationDate {
    /// Build a date, rejecting out-of-range months and days and a day
    /// without a month.
    pub fn new(year: i32, month: Option<u8>, day: Option<u8>) -> Result<Self> {
        let month_ok = month.is_none_or(|m| (1..=12).contains(&m));
        let day_ok = match (month, day) {
            (_, None) => true,
            (Some(_), Some(d)) => (1..=31).contains(&d),
            (None, Some(_)) => false,
        };
        if !month_ok || !day_ok {
            return Err(ModelError::InvalidDate { year, month, day });
        }
        Ok(Self { year, month, day })
    }
}

impl fmt::Display for PublicationDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.year)?;
        if let Some(month) = self.month {
            write!(f, "-{month:02}")?;
            if let Some(day) = self.day {
                write!(f, "-{day:02}")?;
            }
        }
        Ok(())
    }
}

/// One author (or contributing organization) of a publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationAuthor {
    /// Zero-based position in the author list.
    pub position: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    /// Display name used for matching: "Given Family", or the literal name.
    pub name: String,
    /// Bare ORCID identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orcid: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affiliations: Vec<String>,
    /// Consortia, institutions and other non-person contributors.
    #[serde(default)]
    pub is_organization: bool,
}

impl PublicationAuthor {
    /// Person author from separate name parts.
    pub fn person(position: usize, given: Option<String>, family: Option<String>) -> Self {
        let name = [given.as_deref(), family.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            position,
            given,
            family,
            name,
            orcid: None,
            affiliations: Vec::new(),
            is_organization: false,
        }
    }

    /// Organization author with a literal name.
    pub fn organization(position: usize, name: impl Into<String>) -> Self {
        Self {
            position,
            given: None,
            family: None,
            name: name.into().trim().to_string(),
            orcid: None,
            affiliations: Vec::new(),
            is_organization: true,
        }
    }
}

/// Registry-independent description of a published work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationMetadata {
    /// Lowercased DOI without resolver prefix.
    pub doi: String,
    pub title: String,
    pub authors: Vec<PublicationAuthor>,
    /// Journal, proceedings, book series or repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<PublicationDate>,
    #[serde(default)]
    pub kind: PublicationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    pub source: MetadataSource,
}

impl PublicationMetadata {
    /// Empty record for a DOI, filled in by the registry decoders.
    pub fn new(doi: impl Into<String>, source: MetadataSource) -> Self {
        Self {
            doi: doi.into(),
            title: String::new(),
            authors: Vec::new(),
            venue: None,
            publisher: None,
            published: None,
            kind: PublicationKind::Other,
            volume: None,
            issue: None,
            pages: None,
            url: None,
            abstract_text: None,
            source,
        }
    }

    /// Persons only; organizations are never linked to researcher profiles.
    pub fn person_authors(&self) -> impl Iterator<Item = &PublicationAuthor> {
        self.authors.iter().filter(|a| !a.is_organization)
    }

    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.published.map(|d| d.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_display_name_skips_missing_parts() {
        let author = PublicationAuthor::person(0, Some(" Jane ".into()), Some("Doe".into()));
        assert_eq!(author.name, "Jane Doe");

        let family_only = PublicationAuthor::person(1, None, Some("Doe".into()));
        assert_eq!(family_only.name, "Doe");
    }

    #[test]
    fn date_validation() {
        assert!(PublicationDate::new(2020, Some(13), None).is_err());
        assert!(PublicationDate::new(2020, None, Some(4)).is_err());
        assert!(PublicationDate::new(2020, Some(2), Some(0)).is_err());
        let date = PublicationDate::new(2020, Some(5), Some(1)).unwrap();
        assert_eq!(date.to_string(), "2020-05-01");
        assert_eq!(PublicationDate::new(2019, None, None).unwrap().to_string(), "2019");
    }
}
