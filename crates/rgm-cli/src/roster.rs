//! Researcher roster loading from CSV.
//!
//! Expected headers: `id,name,affiliation,orcid`. The last two columns are
//! optional and may be left empty.

use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, Trim};
use rgm_model::{Candidate, normalize_orcid};
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct RosterRow {
    id: String,
    name: String,
    #[serde(default)]
    affiliation: Option<String>,
    #[serde(default)]
    orcid: Option<String>,
}

/// Load a roster file.
pub fn load_roster(path: &Path) -> Result<Vec<Candidate>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("open roster: {}", path.display()))?;
    read_roster(file).with_context(|| format!("read roster: {}", path.display()))
}

/// Parse roster CSV from any reader.
///
/// Rows with a blank name are skipped with a warning, as are ORCIDs that
/// are not of the `dddd-dddd-dddd-dddX` form. A blank or repeated id is an
/// error, since links and matches are reported by id.
pub fn read_roster<R: Read>(reader: R) -> Result<Vec<Candidate>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut seen = BTreeSet::new();
    let mut candidates = Vec::new();
    for (idx, row) in reader.deserialize::<RosterRow>().enumerate() {
        // Header is line 1.
        let line = idx + 2;
        let row = row.with_context(|| format!("line {line}"))?;
        if row.name.is_empty() {
            warn!(line, id = %row.id, "skipping roster row without a name");
            continue;
        }
        let mut candidate =
            Candidate::new(&row.id, &row.name).with_context(|| format!("line {line}"))?;
        if !seen.insert(candidate.id.clone()) {
            bail!("line {line}: duplicate id {:?}", candidate.id);
        }
        if let Some(affiliation) = row.affiliation.filter(|a| !a.is_empty()) {
            candidate = candidate.with_affiliation(affiliation);
        }
        if let Some(raw) = row.orcid.as_deref().filter(|o| !o.is_empty()) {
            match normalize_orcid(raw) {
                Some(orcid) => candidate = candidate.with_orcid(orcid),
                None => warn!(line, id = %candidate.id, orcid = raw, "ignoring malformed ORCID"),
            }
        }
        candidates.push(candidate);
    }

    debug!(candidates = candidates.len(), "roster loaded");
    Ok(candidates)
}
