use rgm_match::{AuthorMatcher, LinkMethod, link_publication_authors};
use rgm_model::{Candidate, MetadataSource, PublicationAuthor, PublicationMetadata};

fn sample_publication() -> PublicationMetadata {
    let mut metadata = PublicationMetadata::new("10.5555/12345678", MetadataSource::Crossref);
    metadata.title = "Toward a Unified Theory of High-Energy Metaphysics".into();

    let mut first = PublicationAuthor::person(0, Some("Josiah".into()), Some("Carberry".into()));
    first.orcid = Some("https://orcid.org/0000-0002-1825-0097".into());
    metadata.authors = vec![
        first,
        PublicationAuthor::person(1, Some("Jane M.".into()), Some("Doe".into())),
        PublicationAuthor::organization(2, "Brown University Metaphysics Consortium"),
        PublicationAuthor::person(3, Some("Richard".into()), Some("Roe".into())),
    ];
    metadata
}

fn roster() -> Vec<Candidate> {
    vec![
        // Name differs, ORCID wins.
        Candidate::new("carberry", "J. S. Carberry")
            .unwrap()
            .with_orcid("0000-0002-1825-0097"),
        Candidate::new("doe-j", "J. Doe").unwrap(),
        Candidate::new("doe-jane", "Dr. Jane Doe").unwrap(),
        Candidate::new("consortium", "Brown University Metaphysics Consortium").unwrap(),
    ]
}

#[test]
fn links_by_orcid_then_best_name() {
    let report = link_publication_authors(&sample_publication(), &roster(), None);

    assert_eq!(report.doi, "10.5555/12345678");
    assert_eq!(report.links.len(), 2);

    let carberry = report.link_for(0).unwrap();
    assert_eq!(carberry.candidate.id, "carberry");
    assert_eq!(carberry.method, LinkMethod::Orcid);
    assert_eq!(carberry.score, 1.0);

    let doe = report.link_for(1).unwrap();
    assert_eq!(doe.candidate.id, "doe-jane");
    assert_eq!(doe.method, LinkMethod::Name);

    // Organizations are never name-matched, Richard Roe has no profile.
    assert_eq!(report.unlinked, vec![2, 3]);
}

#[test]
fn greedy_assignment_prefers_stronger_pairs() {
    let mut metadata = PublicationMetadata::new("10.1/x", MetadataSource::DataCite);
    metadata.authors = vec![
        PublicationAuthor::person(0, Some("J.".into()), Some("Doe".into())),
        PublicationAuthor::person(1, Some("Jane".into()), Some("Doe".into())),
    ];
    let candidates = vec![Candidate::new("jane", "Jane Doe").unwrap()];

    let report = AuthorMatcher::default()
        .with_threshold(0.5)
        .link_publication(&metadata, &candidates);

    // "Jane Doe" is an exact match and takes the only profile even though
    // "J. Doe" comes first in the author list.
    assert_eq!(report.links.len(), 1);
    assert_eq!(report.links[0].author_position, 1);
    assert_eq!(report.unlinked, vec![0]);
}

#[test]
fn report_serializes() {
    let report = link_publication_authors(&sample_publication(), &roster(), None);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["links"][0]["method"], "orcid");
    assert_eq!(json["links"][1]["candidate"]["id"], "doe-jane");
}
