use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a [`crate::MatcherConfig`].
///
/// Matching itself never fails; only configuration can be rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse TOML config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{name} must be within [0, 1], got {value}")]
    ThresholdOutOfRange { name: &'static str, value: f64 },

    #[error("confidence levels must satisfy low <= medium <= high (got {low}, {medium}, {high})")]
    ThresholdOrder { low: f64, medium: f64, high: f64 },

    #[error("blank entry in {field}")]
    BlankEntry { field: &'static str },
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
