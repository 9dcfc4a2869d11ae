//! Error type shared by the domain services.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),

    #[error("Transaction failed: {0}")]
    Transaction(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl DomainError {
    /// Convert a repository error, keeping domain errors raised while
    /// decoding stored rows (e.g. an unknown frequency tag) as themselves.
    pub fn from_storage(err: anyhow::Error) -> Self {
        match err.downcast::<DomainError>() {
            Ok(domain) => domain,
            Err(other) => DomainError::Storage(other),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
