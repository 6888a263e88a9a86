//! Booking-specific error types.

use thiserror::Error;

use crate::domain::foundation::{BookingId, DomainError, ErrorCode, ServiceId, ValidationError};
use crate::ports::StoreError;

use super::BookingStatus;

/// Errors raised while creating or transitioning bookings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    /// The requested status change is not in the transition graph.
    #[error("Cannot move booking from {from} to {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    /// The caller may not perform this change.
    #[error("{message}")]
    Unauthorized { authenticated: bool, message: String },

    /// `end` precedes `start`.
    #[error("Booking end must not precede its start")]
    InvalidRange,

    /// The service is not currently bookable.
    #[error("Service {0} is not available for booking")]
    ServiceUnavailable(ServiceId),

    #[error("Booking not found: {0}")]
    NotFound(BookingId),

    #[error("Service not found: {0}")]
    ServiceNotFound(ServiceId),

    /// Another writer changed the booking first. Safe to retry after reload.
    #[error("Booking {0} was changed concurrently")]
    WriteConflict(BookingId),

    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Store error: {0}")]
    Store(StoreError),
}

impl BookingError {
    pub fn invalid_transition(from: BookingStatus, to: BookingStatus) -> Self {
        BookingError::InvalidTransition { from, to }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            BookingError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            BookingError::Unauthorized {
                authenticated: false,
                ..
            } => ErrorCode::Unauthorized,
            BookingError::Unauthorized { .. } => ErrorCode::Forbidden,
            BookingError::InvalidRange => ErrorCode::InvalidRange,
            BookingError::ServiceUnavailable(_) => ErrorCode::ServiceUnavailable,
            BookingError::NotFound(_) => ErrorCode::BookingNotFound,
            BookingError::ServiceNotFound(_) => ErrorCode::ServiceNotFound,
            BookingError::WriteConflict(_) => ErrorCode::WriteConflict,
            BookingError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            BookingError::Store(err) => err.code(),
        }
    }

    /// Returns true if the caller may reload and try again.
    ///
    /// Nothing in this crate retries automatically.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BookingError::WriteConflict(_))
    }
}

impl From<DomainError> for BookingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Unauthorized => BookingError::Unauthorized {
                authenticated: false,
                message: err.message,
            },
            ErrorCode::Forbidden => BookingError::Unauthorized {
                authenticated: true,
                message: err.message,
            },
            ErrorCode::InvalidRange => BookingError::InvalidRange,
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => BookingError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => BookingError::Store(StoreError::unavailable(err.message)),
        }
    }
}

impl From<ValidationError> for BookingError {
    fn from(err: ValidationError) -> Self {
        BookingError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<StoreError> for BookingError {
    fn from(err: StoreError) -> Self {
        BookingError::Store(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_write_conflict_is_retryable() {
        assert!(BookingError::WriteConflict(BookingId::new()).is_retryable());
        assert!(!BookingError::InvalidRange.is_retryable());
        assert!(!BookingError::Store(StoreError::unavailable("down")).is_retryable());
        assert!(!BookingError::invalid_transition(
            BookingStatus::Confirmed,
            BookingStatus::Cancelled
        )
        .is_retryable());
    }

    #[test]
    fn unauthorized_code_depends_on_sign_in() {
        let anonymous = BookingError::from(DomainError::new(ErrorCode::Unauthorized, "x"));
        let denied = BookingError::from(DomainError::new(ErrorCode::Forbidden, "x"));
        assert_eq!(anonymous.code(), ErrorCode::Unauthorized);
        assert_eq!(denied.code(), ErrorCode::Forbidden);
    }

    #[test]
    fn invalid_transition_message_names_states() {
        let err = BookingError::invalid_transition(BookingStatus::Cancelled, BookingStatus::Confirmed);
        assert_eq!(err.to_string(), "Cannot move booking from cancelled to confirmed");
    }
}
