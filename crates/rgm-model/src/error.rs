use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("candidate id must not be empty")]
    EmptyCandidateId,
    #[error("invalid publication date {year}-{month:?}-{day:?}")]
    InvalidDate {
        year: i32,
        month: Option<u8>,
        day: Option<u8>,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
