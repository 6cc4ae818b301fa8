//! Shared data types for the research group manager.
//!
//! - [`candidate`]: researcher profiles offered to the author matcher
//! - [`publication`]: bibliographic records normalized from DOI registries
//! - [`orcid`]: ORCID identifier normalization
//! - [`error`]: validation errors for model values

#![deny(unsafe_code)]

pub mod candidate;
pub mod error;
pub mod orcid;
pub mod publication;

pub use candidate::{AuthorMatch, Candidate};
pub use error::{ModelError, Result};
pub use orcid::normalize_orcid;
pub use publication::{
    MetadataSource, PublicationAuthor, PublicationDate, PublicationKind, PublicationMetadata,
};
