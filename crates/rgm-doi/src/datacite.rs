//! DataCite `/dois/{doi}` decoding.

use rgm_model::{
    MetadataSource, PublicationAuthor, PublicationDate, PublicationKind, PublicationMetadata,
    normalize_orcid,
};
use serde::Deserialize;
use tracing::warn;

use crate::doi::Doi;
use crate::error::{DoiError, Result};
use crate::text::{clean, collapse_whitespace, nullable, strip_markup};

pub(crate) const REGISTRY: &str = "DataCite";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct DataCiteAttributes {
    doi: Option<String>,
    #[serde(deserialize_with = "nullable")]
    creators: Vec<Creator>,
    #[serde(deserialize_with = "nullable")]
    titles: Vec<Title>,
    publisher: Option<Publisher>,
    publication_year: Option<YearValue>,
    #[serde(deserialize_with = "nullable")]
    dates: Vec<DataCiteDate>,
    types: Option<Types>,
    container: Option<Container>,
    #[serde(deserialize_with = "nullable")]
    descriptions: Vec<Description>,
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Creator {
    name: Option<String>,
    name_type: Option<String>,
    given_name: Option<String>,
    family_name: Option<String>,
    #[serde(deserialize_with = "nullable")]
    affiliation: Vec<Affiliation>,
    #[serde(deserialize_with = "nullable")]
    name_identifiers: Vec<NameIdentifier>,
}

/// Older records list affiliations as plain strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Affiliation {
    Name(String),
    Object {
        #[serde(default)]
        name: Option<String>,
    },
}

impl Affiliation {
    fn name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name.as_str()),
            Self::Object { name } => name.as_deref(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct NameIdentifier {
    name_identifier: Option<String>,
    name_identifier_scheme: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Title {
    title: Option<String>,
    title_type: Option<String>,
}

/// Schema 4.5 turned the publisher into an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Publisher {
    Name(String),
    Object {
        #[serde(default)]
        name: Option<String>,
    },
}

impl Publisher {
    fn name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name.as_str()),
            Self::Object { name } => name.as_deref(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum YearValue {
    Number(i64),
    Text(String),
}

impl YearValue {
    fn year(&self) -> Option<i32> {
        match self {
            Self::Number(n) => i32::try_from(*n).ok(),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct DataCiteDate {
    date: Option<String>,
    date_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Types {
    resource_type_general: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Container {
    title: Option<String>,
    volume: Option<String>,
    issue: Option<String>,
    first_page: Option<String>,
    last_page: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Description {
    description: Option<String>,
    description_type: Option<String>,
}

/// Decode a DataCite record, either the JSON:API envelope
/// (`{"data": {"attributes": {...}}}`) or the bare attributes.
pub fn parse_doi(json: &str) -> Result<PublicationMetadata> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| DoiError::decode(REGISTRY, e.to_string()))?;
    from_value(value)
}

pub(crate) fn from_value(mut value: serde_json::Value) -> Result<PublicationMetadata> {
    if let Some(data) = value.get_mut("data") {
        value = data.take();
    }
    if let Some(attributes) = value.get_mut("attributes") {
        value = attributes.take();
    }
    let attributes: DataCiteAttributes =
        serde_json::from_value(value).map_err(|e| DoiError::decode(REGISTRY, e.to_string()))?;
    convert(attributes)
}

fn convert(record: DataCiteAttributes) -> Result<PublicationMetadata> {
    let raw_doi = record
        .doi
        .as_deref()
        .ok_or_else(|| DoiError::decode(REGISTRY, "record has no DOI"))?;
    let doi = Doi::parse(raw_doi)?;

    let mut metadata = PublicationMetadata::new(doi.as_str(), MetadataSource::DataCite);
    metadata.title = compose_title(&record.titles);
    metadata.authors = convert_creators(record.creators);
    metadata.publisher = clean(record.publisher.as_ref().and_then(Publisher::name));
    metadata.published = issued_date(&record.dates).or_else(|| {
        let year = record.publication_year.as_ref()?.year()?;
        PublicationDate::new(year, None, None).ok()
    });
    metadata.kind = record
        .types
        .as_ref()
        .and_then(|t| t.resource_type_general.as_deref())
        .map_or(PublicationKind::Other, map_kind);
    if let Some(container) = &record.container {
        metadata.venue = clean(container.title.as_deref());
        metadata.volume = clean(container.volume.as_deref());
        metadata.issue = clean(container.issue.as_deref());
        metadata.pages = page_range(
            clean(container.first_page.as_deref()),
            clean(container.last_page.as_deref()),
        );
    }
    metadata.url = clean(record.url.as_deref()).or_else(|| Some(doi.url()));
    metadata.abstract_text = record
        .descriptions
        .iter()
        .find(|d| d.description_type.as_deref() == Some("Abstract"))
        .and_then(|d| d.description.as_deref())
        .map(strip_markup)
        .filter(|s| !s.is_empty());
    Ok(metadata)
}

fn compose_title(titles: &[Title]) -> String {
    let main = titles
        .iter()
        .find(|t| t.title_type.is_none())
        .or_else(|| titles.first())
        .and_then(|t| t.title.as_deref())
        .map(collapse_whitespace)
        .unwrap_or_default();
    let subtitle = titles
        .iter()
        .find(|t| t.title_type.as_deref() == Some("Subtitle"))
        .and_then(|t| clean(t.title.as_deref()));
    match subtitle {
        Some(subtitle) if !main.is_empty() && main != subtitle => format!("{main}: {subtitle}"),
        _ => main,
    }
}

fn convert_creators(creators: Vec<Creator>) -> Vec<PublicationAuthor> {
    let mut authors = Vec::with_capacity(creators.len());
    for creator in creators {
        let position = authors.len();
        let mut author = if creator.name_type.as_deref() == Some("Organizational") {
            let Some(name) = clean(creator.name.as_deref()) else {
                warn!(position, "skipping DataCite organization without a name");
                continue;
            };
            PublicationAuthor::organization(position, name)
        } else {
            let given = clean(creator.given_name.as_deref());
            let family = clean(creator.family_name.as_deref());
            if given.is_some() || family.is_some() {
                PublicationAuthor::person(position, given, family)
            } else if let Some(name) = clean(creator.name.as_deref()) {
                match name.split_once(',') {
                    Some((family, given)) => PublicationAuthor::person(
                        position,
                        clean(Some(given)),
                        clean(Some(family)),
                    ),
                    None => PublicationAuthor::person(position, None, Some(name)),
                }
            } else {
                warn!(position, "skipping DataCite creator without a name");
                continue;
            }
        };
        author.orcid = creator
            .name_identifiers
            .iter()
            .filter(|id| {
                id.name_identifier_scheme
                    .as_deref()
                    .is_some_and(|scheme| scheme.eq_ignore_ascii_case("orcid"))
            })
            .find_map(|id| id.name_identifier.as_deref().and_then(normalize_orcid));
        author.affiliations = creator
            .affiliation
            .iter()
            .filter_map(|a| clean(a.name()))
            .collect();
        authors.push(author);
    }
    authors
}

/// `Issued` date, as `YYYY`, `YYYY-MM` or `YYYY-MM-DD` (time parts ignored).
fn issued_date(dates: &[DataCiteDate]) -> Option<PublicationDate> {
    let raw = dates
        .iter()
        .find(|d| d.date_type.as_deref() == Some("Issued"))?
        .date
        .as_deref()?
        .trim();
    let date_part = raw.split(['T', ' ']).next().unwrap_or(raw);
    let mut parts = date_part.split('-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month = parts.next().and_then(|m| m.parse::<u8>().ok());
    let day = month.and(parts.next().and_then(|d| d.parse::<u8>().ok()));
    match PublicationDate::new(year, month, day) {
        Ok(date) => Some(date),
        Err(error) => {
            warn!(%error, raw, "ignoring invalid DataCite date");
            None
        }
    }
}

fn page_range(first: Option<String>, last: Option<String>) -> Option<String> {
    match (first, last) {
        (Some(first), Some(last)) if first != last => Some(format!("{first}-{last}")),
        (Some(first), _) => Some(first),
        (None, last) => last,
    }
}

fn map_kind(resource_type: &str) -> PublicationKind {
    match resource_type {
        "JournalArticle" => PublicationKind::JournalArticle,
        "ConferencePaper" | "ConferenceProceeding" => PublicationKind::ConferencePaper,
        "BookChapter" => PublicationKind::BookChapter,
        "Book" => PublicationKind::Book,
        "Dataset" => PublicationKind::Dataset,
        "Preprint" => PublicationKind::Preprint,
        "Dissertation" => PublicationKind::Thesis,
        "Report" => PublicationKind::Report,
        "Software" | "ComputationalNotebook" => PublicationKind::Software,
        _ => PublicationKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &str = r#"{
        "data": {
            "id": "10.5281/zenodo.3551",
            "type": "dois",
            "attributes": {
                "doi": "10.5281/ZENODO.3551",
                "creators": [
                    {
                        "name": "Doe, Jane",
                        "nameType": "Personal",
                        "givenName": "Jane",
                        "familyName": "Doe",
                        "affiliation": ["CERN"],
                        "nameIdentifiers": [
                            {"nameIdentifier": "https://orcid.org/0000-0001-5000-0007", "nameIdentifierScheme": "ORCID"}
                        ]
                    },
                    {"name": "Smith, John", "affiliation": [{"name": "ETH Zürich"}]},
                    {"name": "Open Data Consortium", "nameType": "Organizational"},
                    {"nameType": "Personal"}
                ],
                "titles": [
                    {"title": "Sensor readings", "titleType": "Subtitle"},
                    {"title": "Alpine  climate archive"}
                ],
                "publisher": {"name": "Zenodo"},
                "publicationYear": "2019",
                "dates": [
                    {"date": "2019-11-20", "dateType": "Created"},
                    {"date": "2019-11-21T10:00:00Z", "dateType": "Issued"}
                ],
                "types": {"resourceTypeGeneral": "Dataset"},
                "descriptions": [
                    {"description": "Methods", "descriptionType": "Methods"},
                    {"description": "<p>Hourly data.</p>", "descriptionType": "Abstract"}
                ],
                "url": "https://zenodo.org/record/3551"
            }
        }
    }"#;

    #[test]
    fn decodes_envelope() {
        let metadata = parse_doi(RECORD).unwrap();
        assert_eq!(metadata.doi, "10.5281/zenodo.3551");
        assert_eq!(metadata.title, "Alpine climate archive: Sensor readings");
        assert_eq!(metadata.publisher.as_deref(), Some("Zenodo"));
        assert_eq!(metadata.kind, PublicationKind::Dataset);
        assert_eq!(metadata.published.unwrap().to_string(), "2019-11-21");
        assert_eq!(metadata.abstract_text.as_deref(), Some("Hourly data."));
        assert_eq!(metadata.url.as_deref(), Some("https://zenodo.org/record/3551"));
        assert_eq!(metadata.source, MetadataSource::DataCite);
    }

    #[test]
    fn decodes_creators() {
        let metadata = parse_doi(RECORD).unwrap();
        assert_eq!(metadata.authors.len(), 3);

        let jane = &metadata.authors[0];
        assert_eq!(jane.name, "Jane Doe");
        assert_eq!(jane.orcid.as_deref(), Some("0000-0001-5000-0007"));
        assert_eq!(jane.affiliations, vec!["CERN".to_string()]);

        let john = &metadata.authors[1];
        assert_eq!(john.given.as_deref(), Some("John"));
        assert_eq!(john.family.as_deref(), Some("Smith"));
        assert_eq!(john.name, "John Smith");
        assert_eq!(john.affiliations, vec!["ETH Zürich".to_string()]);

        let org = &metadata.authors[2];
        assert!(org.is_organization);
        assert_eq!(org.position, 2);
    }

    #[test]
    fn bare_attributes_with_container_and_numeric_year() {
        let metadata = parse_doi(
            r#"{"doi": "10.14454/x1", "titles": [{"title": "Paper"}],
                "publisher": "DataCite", "publicationYear": 2021,
                "types": {"resourceTypeGeneral": "ConferenceProceeding"},
                "container": {"title": "Proc. X", "volume": "3", "firstPage": "10", "lastPage": "19"}}"#,
        )
        .unwrap();
        assert_eq!(metadata.published.unwrap().to_string(), "2021");
        assert_eq!(metadata.kind, PublicationKind::ConferencePaper);
        assert_eq!(metadata.venue.as_deref(), Some("Proc. X"));
        assert_eq!(metadata.volume.as_deref(), Some("3"));
        assert_eq!(metadata.pages.as_deref(), Some("10-19"));
        assert_eq!(metadata.publisher.as_deref(), Some("DataCite"));
        assert_eq!(metadata.url.as_deref(), Some("https://doi.org/10.14454/x1"));
    }

    #[test]
    fn single_name_creator_becomes_family_name() {
        let metadata = parse_doi(r#"{"doi": "10.1/x", "creators": [{"name": "Plato"}]}"#).unwrap();
        let author = &metadata.authors[0];
        assert_eq!(author.family.as_deref(), Some("Plato"));
        assert!(!author.is_organization);
    }

    #[test]
    fn missing_doi_is_decode_error() {
        let err = parse_doi(r#"{"data": {"attributes": {"titles": []}}}"#).unwrap_err();
        assert!(matches!(err, DoiError::Decode { registry: "DataCite", .. }));
    }
}
