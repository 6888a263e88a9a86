//! Catalog-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ServiceId, ValidationError};
use crate::ports::StoreError;

/// Errors raised by service catalog operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Service not found: {0}")]
    NotFound(ServiceId),

    #[error("Sign in required")]
    Unauthenticated,

    #[error("Not permitted to modify this service")]
    Forbidden,

    #[error("Invalid status change: {0}")]
    InvalidTransition(String),

    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl CatalogError {
    pub fn not_found(id: ServiceId) -> Self {
        CatalogError::NotFound(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CatalogError::NotFound(_) => ErrorCode::ServiceNotFound,
            CatalogError::Unauthenticated => ErrorCode::Unauthorized,
            CatalogError::Forbidden => ErrorCode::Forbidden,
            CatalogError::InvalidTransition(_) => ErrorCode::InvalidStateTransition,
            CatalogError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            CatalogError::Store(err) => err.code(),
        }
    }
}

impl From<ValidationError> for CatalogError {
    fn from(err: ValidationError) -> Self {
        CatalogError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for CatalogError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Unauthorized => CatalogError::Unauthenticated,
            ErrorCode::Forbidden => CatalogError::Forbidden,
            ErrorCode::InvalidStateTransition => CatalogError::InvalidTransition(err.message),
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => CatalogError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => CatalogError::Store(StoreError::unavailable(err.message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_domain_error_maps_to_forbidden() {
        let err = DomainError::new(ErrorCode::Forbidden, "nope");
        assert_eq!(CatalogError::from(err), CatalogError::Forbidden);
    }

    #[test]
    fn validation_error_keeps_field() {
        let err = CatalogError::from(ValidationError::empty_field("title"));
        match err {
            CatalogError::ValidationFailed { field, .. } => assert_eq!(field, "title"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn store_error_code_passes_through() {
        let err = CatalogError::from(StoreError::conflict("x"));
        assert_eq!(err.code(), ErrorCode::WriteConflict);
    }
}
