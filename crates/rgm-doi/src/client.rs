//! Blocking HTTP client for the Crossref and DataCite REST APIs.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, RETRY_AFTER};
use rgm_model::PublicationMetadata;
use tracing::{debug, info, warn};

use crate::doi::Doi;
use crate::error::{DoiError, Result};
use crate::merge::merge;
use crate::{crossref, datacite};

/// Crossref works endpoint.
pub const CROSSREF_API_URL: &str = "https://api.crossref.org/works";

/// DataCite DOIs endpoint.
pub const DATACITE_API_URL: &str = "https://api.datacite.org/dois";

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Wait suggested when a 429 response has no usable `Retry-After`.
const DEFAULT_RETRY_AFTER: u64 = 60;

const USER_AGENT_BASE: &str = concat!("rgm/", env!("CARGO_PKG_VERSION"));

/// Settings for [`DoiClient`].
#[derive(Debug, Clone)]
pub struct DoiClientConfig {
    /// Contact address sent in the user agent (Crossref "polite pool").
    pub mailto: Option<String>,
    pub timeout: Duration,
    pub crossref_url: String,
    pub datacite_url: String,
}

impl Default for DoiClientConfig {
    fn default() -> Self {
        Self {
            mailto: None,
            timeout: REQUEST_TIMEOUT,
            crossref_url: CROSSREF_API_URL.to_string(),
            datacite_url: DATACITE_API_URL.to_string(),
        }
    }
}

impl DoiClientConfig {
    fn user_agent(&self) -> String {
        match self.mailto.as_deref().map(str::trim) {
            Some(mailto) if !mailto.is_empty() => format!("{USER_AGENT_BASE} (mailto:{mailto})"),
            _ => USER_AGENT_BASE.to_string(),
        }
    }
}

/// Client for resolving DOIs to [`PublicationMetadata`].
#[derive(Debug, Clone)]
pub struct DoiClient {
    client: Client,
    config: DoiClientConfig,
}

impl DoiClient {
    /// Create a new client.
    pub fn new(config: DoiClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent())
            .build()
            .map_err(|e| DoiError::Network(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    /// Fetch metadata, trying Crossref first.
    ///
    /// DataCite is consulted when Crossref does not know the DOI, and to
    /// complete a Crossref record that has no authors or no venue.
    pub fn fetch(&self, doi: &Doi) -> Result<PublicationMetadata> {
        let primary = match self.fetch_crossref(doi) {
            Ok(record) => record,
            Err(DoiError::NotFound(_)) => {
                debug!(%doi, "not registered with Crossref, trying DataCite");
                return self.fetch_datacite(doi);
            }
            Err(err) => return Err(err),
        };

        if !primary.authors.is_empty() && primary.venue.is_some() {
            return Ok(primary);
        }

        match self.fetch_datacite(doi) {
            Ok(secondary) => Ok(merge(primary, &secondary)),
            Err(DoiError::NotFound(_)) => Ok(primary),
            Err(err) => {
                warn!(%doi, error = %err, "DataCite lookup failed, keeping Crossref record");
                Ok(primary)
            }
        }
    }

    pub fn fetch_crossref(&self, doi: &Doi) -> Result<PublicationMetadata> {
        let url = record_url(&self.config.crossref_url, doi);
        let body = self.get(&url, crossref::REGISTRY, doi)?;
        let metadata = crossref::parse_work(&body)?;
        info!(%doi, authors = metadata.authors.len(), "fetched Crossref record");
        Ok(metadata)
    }

    pub fn fetch_datacite(&self, doi: &Doi) -> Result<PublicationMetadata> {
        let url = record_url(&self.config.datacite_url, doi);
        let body = self.get(&url, datacite::REGISTRY, doi)?;
        let metadata = datacite::parse_doi(&body)?;
        info!(%doi, authors = metadata.authors.len(), "fetched DataCite record");
        Ok(metadata)
    }

    fn get(&self, url: &str, registry: &'static str, doi: &Doi) -> Result<String> {
        debug!("Fetching {registry} record from {url}");
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()?;
        let response = handle_response(response, registry, doi)?;
        Ok(response.text()?)
    }
}

/// Map error statuses to [`DoiError`].
fn handle_response(response: Response, registry: &'static str, doi: &Doi) -> Result<Response> {
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Err(DoiError::NotFound(doi.to_string()));
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_RETRY_AFTER);
        return Err(DoiError::RateLimited {
            registry,
            retry_after,
        });
    }

    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(DoiError::Network(format!(
            "{registry} API error ({status}): {}",
            body.trim()
        )));
    }

    Ok(response)
}

fn record_url(base: &str, doi: &Doi) -> String {
    format!("{}/{}", base.trim_end_matches('/'), doi.path_encoded())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        assert!(DoiClient::new(DoiClientConfig::default()).is_ok());
    }

    #[test]
    fn record_urls() {
        let doi = Doi::parse("10.1002/(SICI)1097-4571<3>").unwrap();
        assert_eq!(
            record_url(CROSSREF_API_URL, &doi),
            "https://api.crossref.org/works/10.1002/(sici)1097-4571%3C3%3E"
        );
        assert_eq!(
            record_url("http://localhost:8080/dois/", &Doi::parse("10.5281/zenodo.1").unwrap()),
            "http://localhost:8080/dois/10.5281/zenodo.1"
        );
    }

    #[test]
    fn user_agent_carries_contact() {
        let config = DoiClientConfig {
            mailto: Some("lab@example.org".into()),
            ..DoiClientConfig::default()
        };
        assert!(config.user_agent().starts_with("rgm/"));
        assert!(config.user_agent().ends_with("(mailto:lab@example.org)"));
        assert_eq!(DoiClientConfig::default().user_agent(), USER_AGENT_BASE);
    }
}
