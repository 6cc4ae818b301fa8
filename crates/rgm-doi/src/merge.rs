//! Combining records for the same DOI from two registries.

use rgm_model::{MetadataSource, PublicationKind, PublicationMetadata};
use tracing::{debug, warn};

/// Complete `primary` with fields from `secondary`.
///
/// Empty fields of `primary` are filled, never overwritten. Authors are
/// taken wholesale only when `primary` has none. When both author lists
/// have the same length, missing ORCIDs and affiliations are filled per
/// position as long as the family names agree. Records for different DOIs
/// are not merged.
pub fn merge(
    mut primary: PublicationMetadata,
    secondary: &PublicationMetadata,
) -> PublicationMetadata {
    if primary.doi != secondary.doi {
        warn!(
            primary = %primary.doi,
            secondary = %secondary.doi,
            "refusing to merge records for different DOIs"
        );
        return primary;
    }

    let mut taken = Vec::new();

    if primary.title.is_empty() && !secondary.title.is_empty() {
        primary.title.clone_from(&secondary.title);
        taken.push("title");
    }
    if primary.authors.is_empty() && !secondary.authors.is_empty() {
        primary.authors.clone_from(&secondary.authors);
        taken.push("authors");
    } else if primary.authors.len() == secondary.authors.len()
        && enrich_authors(&mut primary, secondary)
    {
        taken.push("author identifiers");
    }
    if primary.kind == PublicationKind::Other && secondary.kind != PublicationKind::Other {
        primary.kind = secondary.kind;
        taken.push("kind");
    }
    if primary.published.is_none() && secondary.published.is_some() {
        primary.published = secondary.published;
        taken.push("published");
    }

    for (name, target, source) in [
        ("venue", &mut primary.venue, &secondary.venue),
        ("publisher", &mut primary.publisher, &secondary.publisher),
        ("volume", &mut primary.volume, &secondary.volume),
        ("issue", &mut primary.issue, &secondary.issue),
        ("pages", &mut primary.pages, &secondary.pages),
        ("url", &mut primary.url, &secondary.url),
        ("abstract", &mut primary.abstract_text, &secondary.abstract_text),
    ] {
        if target.is_none() && source.is_some() {
            target.clone_from(source);
            taken.push(name);
        }
    }

    if !taken.is_empty() {
        debug!(doi = %primary.doi, fields = ?taken, "merged metadata from {}", secondary.source);
        primary.source = MetadataSource::Merged;
    }
    primary
}

fn enrich_authors(primary: &mut PublicationMetadata, secondary: &PublicationMetadata) -> bool {
    let mut changed = false;
    for (target, source) in primary.authors.iter_mut().zip(&secondary.authors) {
        if !same_family(target.family.as_deref(), source.family.as_deref()) {
            continue;
        }
        if target.orcid.is_none() && source.orcid.is_some() {
            target.orcid.clone_from(&source.orcid);
            changed = true;
        }
        if target.affiliations.is_empty() && !source.affiliations.is_empty() {
            target.affiliations.clone_from(&source.affiliations);
            changed = true;
        }
    }
    changed
}

fn same_family(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.trim().to_lowercase() == b.trim().to_lowercase(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use rgm_model::{PublicationAuthor, PublicationDate};

    use super::*;

    fn record(source: MetadataSource) -> PublicationMetadata {
        PublicationMetadata::new("10.1/x", source)
    }

    #[test]
    fn fills_only_empty_fields() {
        let mut primary = record(MetadataSource::Crossref);
        primary.title = "Primary title".into();
        primary.volume = Some("1".into());

        let mut secondary = record(MetadataSource::DataCite);
        secondary.title = "Other title".into();
        secondary.volume = Some("2".into());
        secondary.venue = Some("Journal".into());
        secondary.kind = PublicationKind::Dataset;
        secondary.published = Some(PublicationDate::new(2020, None, None).unwrap());

        let merged = merge(primary, &secondary);
        assert_eq!(merged.title, "Primary title");
        assert_eq!(merged.volume.as_deref(), Some("1"));
        assert_eq!(merged.venue.as_deref(), Some("Journal"));
        assert_eq!(merged.kind, PublicationKind::Dataset);
        assert_eq!(merged.year(), Some(2020));
        assert_eq!(merged.source, MetadataSource::Merged);
    }

    #[test]
    fn nothing_taken_keeps_source() {
        let mut primary = record(MetadataSource::Crossref);
        primary.title = "T".into();
        let merged = merge(primary, &record(MetadataSource::DataCite));
        assert_eq!(merged.source, MetadataSource::Crossref);
    }

    #[test]
    fn authors_enriched_by_position_when_family_matches() {
        let mut primary = record(MetadataSource::Crossref);
        primary.authors = vec![
            PublicationAuthor::person(0, Some("Jane".into()), Some("Doe".into())),
            PublicationAuthor::person(1, Some("John".into()), Some("Smith".into())),
        ];
        let mut secondary = record(MetadataSource::DataCite);
        let mut jane = PublicationAuthor::person(0, Some("J.".into()), Some("DOE".into()));
        jane.orcid = Some("0000-0001-5000-0007".into());
        jane.affiliations = vec!["CERN".into()];
        let mut other = PublicationAuthor::person(1, Some("Ann".into()), Some("Lee".into()));
        other.orcid = Some("0000-0002-0000-0000".into());
        secondary.authors = vec![jane, other];

        let merged = merge(primary, &secondary);
        assert_eq!(merged.authors[0].name, "Jane Doe");
        assert_eq!(merged.authors[0].orcid.as_deref(), Some("0000-0001-5000-0007"));
        assert_eq!(merged.authors[0].affiliations, vec!["CERN".to_string()]);
        assert_eq!(merged.authors[1].orcid, None);
        assert_eq!(merged.source, MetadataSource::Merged);
    }

    #[test]
    fn different_dois_are_not_merged() {
        let primary = record(MetadataSource::Crossref);
        let mut secondary = PublicationMetadata::new("10.1/y", MetadataSource::DataCite);
        secondary.title = "Other".into();
        let merged = merge(primary.clone(), &secondary);
        assert_eq!(merged, primary);
    }
}
