//! Review-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ReviewId, ServiceId, ValidationError};
use crate::ports::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("Review not found: {0}")]
    NotFound(ReviewId),

    #[error("Service not found: {0}")]
    ServiceNotFound(ServiceId),

    /// The author already reviewed this service.
    #[error("Service {0} has already been reviewed by this user")]
    AlreadyReviewed(ServiceId),

    #[error("Sign in required")]
    Unauthenticated,

    #[error("Not permitted to modify this review")]
    Forbidden,

    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl ReviewError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ReviewError::NotFound(_) => ErrorCode::ReviewNotFound,
            ReviewError::ServiceNotFound(_) => ErrorCode::ServiceNotFound,
            ReviewError::AlreadyReviewed(_) => ErrorCode::AlreadyReviewed,
            ReviewError::Unauthenticated => ErrorCode::Unauthorized,
            ReviewError::Forbidden => ErrorCode::Forbidden,
            ReviewError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ReviewError::Store(err) => err.code(),
        }
    }
}

impl From<ValidationError> for ReviewError {
    fn from(err: ValidationError) -> Self {
        ReviewError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for ReviewError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Unauthorized => ReviewError::Unauthenticated,
            ErrorCode::Forbidden => ReviewError::Forbidden,
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => ReviewError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => ReviewError::Store(StoreError::unavailable(err.message)),
        }
    }
}
