//! Crossref `/works/{doi}` decoding.

use rgm_model::{
    MetadataSource, PublicationAuthor, PublicationDate, PublicationKind, PublicationMetadata,
    normalize_orcid,
};
use serde::Deserialize;
use tracing::warn;

use crate::doi::Doi;
use crate::error::{DoiError, Result};
use crate::text::{clean, collapse_whitespace, nullable, strip_markup};

pub(crate) const REGISTRY: &str = "Crossref";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
struct CrossrefWork {
    #[serde(rename = "DOI")]
    doi: Option<String>,
    #[serde(deserialize_with = "nullable")]
    title: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    subtitle: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    author: Vec<CrossrefContributor>,
    #[serde(deserialize_with = "nullable")]
    container_title: Vec<String>,
    publisher: Option<String>,
    #[serde(rename = "type")]
    work_type: Option<String>,
    volume: Option<String>,
    issue: Option<String>,
    page: Option<String>,
    #[serde(rename = "URL")]
    url: Option<String>,
    #[serde(rename = "abstract")]
    abstract_text: Option<String>,
    published_print: Option<DateParts>,
    published_online: Option<DateParts>,
    issued: Option<DateParts>,
    created: Option<DateParts>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CrossrefContributor {
    given: Option<String>,
    family: Option<String>,
    /// Organizations carry a single name.
    name: Option<String>,
    #[serde(rename = "ORCID")]
    orcid: Option<String>,
    #[serde(deserialize_with = "nullable")]
    affiliation: Vec<CrossrefAffiliation>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CrossrefAffiliation {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DateParts {
    #[serde(rename = "date-parts", deserialize_with = "nullable")]
    date_parts: Vec<Vec<Option<i64>>>,
}

impl DateParts {
    fn to_date(&self) -> Option<PublicationDate> {
        let parts = self.date_parts.first()?;
        let year = i32::try_from((*parts.first()?)?).ok()?;
        let month = parts.get(1).copied().flatten().and_then(|m| u8::try_from(m).ok());
        let day = parts.get(2).copied().flatten().and_then(|d| u8::try_from(d).ok());
        match PublicationDate::new(year, month, day) {
            Ok(date) => Some(date),
            Err(error) => {
                warn!(%error, "ignoring invalid Crossref date");
                None
            }
        }
    }
}

/// Decode a Crossref work, either the full API envelope
/// (`{"status": "ok", "message": {...}}`) or the bare message.
pub fn parse_work(json: &str) -> Result<PublicationMetadata> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| DoiError::decode(REGISTRY, e.to_string()))?;
    from_value(value)
}

pub(crate) fn from_value(mut value: serde_json::Value) -> Result<PublicationMetadata> {
    if let Some(message) = value.get_mut("message") {
        value = message.take();
    }
    let work: CrossrefWork =
        serde_json::from_value(value).map_err(|e| DoiError::decode(REGISTRY, e.to_string()))?;
    convert(work)
}

fn convert(work: CrossrefWork) -> Result<PublicationMetadata> {
    let raw_doi = work
        .doi
        .as_deref()
        .ok_or_else(|| DoiError::decode(REGISTRY, "record has no DOI"))?;
    let doi = Doi::parse(raw_doi)?;

    let mut metadata = PublicationMetadata::new(doi.as_str(), MetadataSource::Crossref);
    metadata.title = compose_title(&work.title, &work.subtitle);
    metadata.authors = convert_authors(work.author);
    metadata.venue = clean(work.container_title.first().map(String::as_str));
    metadata.publisher = clean(work.publisher.as_deref());
    metadata.published = [
        &work.published_print,
        &work.published_online,
        &work.issued,
        &work.created,
    ]
    .into_iter()
    .flatten()
    .find_map(DateParts::to_date);
    metadata.kind = work
        .work_type
        .as_deref()
        .map_or(PublicationKind::Other, map_kind);
    metadata.volume = clean(work.volume.as_deref());
    metadata.issue = clean(work.issue.as_deref());
    metadata.pages = clean(work.page.as_deref());
    metadata.url = clean(work.url.as_deref()).or_else(|| Some(doi.url()));
    metadata.abstract_text = work
        .abstract_text
        .as_deref()
        .map(strip_markup)
        .filter(|s| !s.is_empty());
    Ok(metadata)
}

fn compose_title(titles: &[String], subtitles: &[String]) -> String {
    let title = titles.first().map(|t| collapse_whitespace(t)).unwrap_or_default();
    match subtitles.first().map(|s| collapse_whitespace(s)) {
        Some(subtitle) if !subtitle.is_empty() && !title.is_empty() => {
            format!("{title}: {subtitle}")
        }
        _ => title,
    }
}

fn convert_authors(contributors: Vec<CrossrefContributor>) -> Vec<PublicationAuthor> {
    let mut authors = Vec::with_capacity(contributors.len());
    for contributor in contributors {
        let position = authors.len();
        let given = clean(contributor.given.as_deref());
        let family = clean(contributor.family.as_deref());
        let mut author = if given.is_some() || family.is_some() {
            PublicationAuthor::person(position, given, family)
        } else if let Some(name) = clean(contributor.name.as_deref()) {
            PublicationAuthor::organization(position, name)
        } else {
            warn!(position, "skipping Crossref contributor without a name");
            continue;
        };
        author.orcid = contributor.orcid.as_deref().and_then(normalize_orcid);
        author.affiliations = contributor
            .affiliation
            .into_iter()
            .filter_map(|a| clean(a.name.as_deref()))
            .collect();
        authors.push(author);
    }
    authors
}

fn map_kind(work_type: &str) -> PublicationKind {
    match work_type {
        "journal-article" => PublicationKind::JournalArticle,
        "proceedings-article" => PublicationKind::ConferencePaper,
        "book-chapter" | "book-section" | "book-part" => PublicationKind::BookChapter,
        "book" | "monograph" | "edited-book" | "reference-book" => PublicationKind::Book,
        "dataset" => PublicationKind::Dataset,
        "posted-content" => PublicationKind::Preprint,
        "dissertation" => PublicationKind::Thesis,
        "report" | "report-component" => PublicationKind::Report,
        _ => PublicationKind::Other,
    }
}
