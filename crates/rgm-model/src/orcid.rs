//! ORCID identifier normalization.

/// Reduce an ORCID iD or URL to the bare identifier.
///
/// `https://orcid.org/0000-0002-1825-009x` → `0000-0002-1825-009X`.
/// Returns `None` unless the identifier has the `dddd-dddd-dddd-dddX` shape.
pub fn normalize_orcid(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let id = trimmed
        .rsplit_once("orcid.org/")
        .map_or(trimmed, |(_, id)| id)
        .trim_matches('/')
        .to_uppercase();
    has_orcid_shape(&id).then_some(id)
}

fn has_orcid_shape(id: &str) -> bool {
    id.len() == 19
        && id.bytes().enumerate().all(|(idx, byte)| match idx {
            4 | 9 | 14 => byte == b'-',
            18 => byte.is_ascii_digit() || byte == b'X',
            _ => byte.is_ascii_digit(),
        })
}
