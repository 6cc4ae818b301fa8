//! Decoding saved registry responses and merging them.

use rgm_doi::{DoiError, merge, parse_metadata};
use rgm_model::{MetadataSource, PublicationKind};

const CROSSREF_NO_AUTHORS: &str = r#"{
    "status": "ok",
    "message": {
        "DOI": "10.5281/zenodo.7",
        "type": "other",
        "title": ["Survey  responses"],
        "author": [],
        "publisher": "Zenodo",
        "issued": {"date-parts": [[2022]]}
    }
}"#;

const DATACITE: &str = r#"{
    "data": {
        "attributes": {
            "doi": "10.5281/zenodo.7",
            "creators": [
                {"name": "Ibáñez, María", "nameType": "Personal",
                 "nameIdentifiers": [{"nameIdentifier": "0000-0003-1111-2222", "nameIdentifierScheme": "ORCID"}]},
                {"name": "Research Data Unit", "nameType": "Organizational"}
            ],
            "titles": [{"title": "Survey responses"}],
            "publisher": "Zenodo",
            "publicationYear": 2022,
            "types": {"resourceTypeGeneral": "Dataset"},
            "container": {"title": "Community archive"}
        }
    }
}"#;

#[test]
fn detects_registry_from_shape() {
    let crossref = parse_metadata(CROSSREF_NO_AUTHORS).unwrap();
    assert_eq!(crossref.source, MetadataSource::Crossref);
    assert_eq!(crossref.title, "Survey responses");

    let datacite = parse_metadata(DATACITE).unwrap();
    assert_eq!(datacite.source, MetadataSource::DataCite);
    assert_eq!(datacite.kind, PublicationKind::Dataset);
}

#[test]
fn unknown_shape_is_decode_error() {
    let err = parse_metadata(r#"{"items": []}"#).unwrap_err();
    assert!(matches!(err, DoiError::Decode { .. }));
    assert!(parse_metadata("[").is_err());
}

#[test]
fn crossref_completed_from_datacite() {
    let crossref = parse_metadata(CROSSREF_NO_AUTHORS).unwrap();
    let datacite = parse_metadata(DATACITE).unwrap();
    let merged = merge(crossref, &datacite);

    assert_eq!(merged.source, MetadataSource::Merged);
    assert_eq!(merged.authors.len(), 2);
    assert_eq!(merged.authors[0].name, "María Ibáñez");
    assert_eq!(merged.authors[0].orcid.as_deref(), Some("0000-0003-1111-2222"));
    assert!(merged.authors[1].is_organization);
    assert_eq!(merged.venue.as_deref(), Some("Community archive"));
    assert_eq!(merged.kind, PublicationKind::Dataset);
    assert_eq!(merged.year(), Some(2022));
    assert_eq!(merged.publisher.as_deref(), Some("Zenodo"));
}

#[test]
fn merged_record_serializes() {
    let merged = merge(
        parse_metadata(CROSSREF_NO_AUTHORS).unwrap(),
        &parse_metadata(DATACITE).unwrap(),
    );
    let json = serde_json::to_value(&merged).unwrap();
    assert_eq!(json["source"], "merged");
    assert_eq!(json["kind"], "dataset");
    assert_eq!(json["published"]["year"], 2022);
    assert!(json.get("abstract_text").is_none());
    insta::assert_json_snapshot!(json["authors"], @r#"
    [
      {
        "family": "Ibáñez",
        "given": "María",
        "is_organization": false,
        "name": "María Ibáñez",
        "orcid": "0000-0003-1111-2222",
        "position": 0
      },
      {
        "is_organization": true,
        "name": "Research Data Unit",
        "position": 1
      }
    ]
    "#);
}
