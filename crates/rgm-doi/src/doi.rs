//! DOI parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DoiError, Result};

const RESOLVER_PREFIXES: [&str; 7] = [
    "https://doi.org/",
    "http://doi.org/",
    "https://dx.doi.org/",
    "http://dx.doi.org/",
    "doi.org/",
    "dx.doi.org/",
    "doi:",
];

/// A validated, lowercased DOI without resolver prefix (`10.1000/xyz123`).
///
/// DOIs are case-insensitive, so two spellings of the same DOI compare equal
/// after parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Doi(String);

impl Doi {
    /// Parse a bare DOI, a `doi:` reference or a `doi.org` URL.
    pub fn parse(raw: &str) -> Result<Self> {
        let lowered = raw.trim().to_lowercase();
        let mut rest = lowered.as_str();
        for prefix in RESOLVER_PREFIXES {
            if let Some(stripped) = rest.strip_prefix(prefix) {
                rest = stripped.trim_start();
                break;
            }
        }

        let Some((registrant, suffix)) = rest.split_once('/') else {
            return Err(DoiError::InvalidDoi(raw.to_string()));
        };
        let Some(code) = registrant.strip_prefix("10.") else {
            return Err(DoiError::InvalidDoi(raw.to_string()));
        };
        let code_ok = !code.is_empty() && code.chars().all(|ch| ch.is_ascii_digit() || ch == '.');
        let suffix_ok = !suffix.is_empty() && !suffix.chars().any(char::is_whitespace);
        if !code_ok || !suffix_ok {
            return Err(DoiError::InvalidDoi(raw.to_string()));
        }
        Ok(Self(rest.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolver URL (`https://doi.org/...`).
    pub fn url(&self) -> String {
        format!("https://doi.org/{}", self.0)
    }

    /// DOI encoded for use as a URL path, keeping `/` separators.
    pub(crate) fn path_encoded(&self) -> String {
        let mut encoded = String::with_capacity(self.0.len());
        for byte in self.0.bytes() {
            if byte.is_ascii_alphanumeric() || b"-._~/:;()".contains(&byte) {
                encoded.push(char::from(byte));
            } else {
                encoded.push_str(&format!("%{byte:02X}"));
            }
        }
        encoded
    }
}

impl fmt::Display for Doi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Doi {
    type Err = DoiError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Doi {
    type Error = DoiError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Doi> for String {
    fn from(doi: Doi) -> Self {
        doi.0
    }
}
