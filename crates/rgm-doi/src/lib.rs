//! DOI metadata retrieval for publication records.
//!
//! Resolves a DOI against the Crossref and DataCite REST APIs and decodes
//! both registries into the shared [`PublicationMetadata`] model.
//!
//! # Example
//!
//! ```no_run
//! use rgm_doi::{Doi, DoiClient, DoiClientConfig};
//!
//! fn show() -> rgm_doi::Result<()> {
//!     let client = DoiClient::new(DoiClientConfig::default())?;
//!     let record = client.fetch(&Doi::parse("https://doi.org/10.1038/nphys1170")?)?;
//!     println!("{} ({} authors)", record.title, record.authors.len());
//!     Ok(())
//! }
//! ```

#![deny(unsafe_code)]

pub mod client;
pub mod crossref;
pub mod datacite;
pub mod doi;
pub mod error;
pub mod merge;
mod text;

pub use client::{CROSSREF_API_URL, DATACITE_API_URL, DoiClient, DoiClientConfig};
pub use doi::Doi;
pub use error::{DoiError, Result};
pub use merge::merge;

use rgm_model::PublicationMetadata;

/// Decode a saved registry response, detecting Crossref or DataCite from
/// its shape.
pub fn parse_metadata(json: &str) -> Result<PublicationMetadata> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| DoiError::decode("Crossref/DataCite", e.to_string()))?;
    if value.get("message").is_some() || value.get("DOI").is_some() {
        crossref::from_value(value)
    } else if ["data", "attributes", "doi"]
        .iter()
        .any(|key| value.get(key).is_some())
    {
        datacite::from_value(value)
    } else {
        Err(DoiError::decode(
            "Crossref/DataCite",
            "neither a Crossref work nor a DataCite record",
        ))
    }
}
