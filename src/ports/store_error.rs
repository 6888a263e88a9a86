//! Errors surfaced by data store adapters.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Failure reported by a repository or fetcher implementation.
///
/// The store is the sole arbiter of write races; a lost compare-and-set is
/// reported as `Conflict` and never retried by the adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The addressed row does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A concurrent writer changed the row first.
    #[error("write conflict: {0}")]
    Conflict(String),

    /// The backend could not be reached or answered with an error.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The backend returned a row this crate cannot decode.
    #[error("malformed row: {0}")]
    Malformed(String),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        StoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        StoreError::Conflict(message.into())
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        StoreError::Unavailable(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        StoreError::Malformed(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            StoreError::NotFound { entity, .. } => match *entity {
                "service" => ErrorCode::ServiceNotFound,
                "booking" => ErrorCode::BookingNotFound,
                "review" => ErrorCode::ReviewNotFound,
                "profile" => ErrorCode::ProfileNotFound,
                _ => ErrorCode::StoreUnavailable,
            },
            StoreError::Conflict(_) => ErrorCode::WriteConflict,
            StoreError::Unavailable(_) => ErrorCode::StoreUnavailable,
            StoreError::Malformed(_) => ErrorCode::InternalError,
        }
    }
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
