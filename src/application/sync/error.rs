//! Errors raised while keeping local views in step with the backend.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{StoreError, TransportError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// Subscribing or unsubscribing failed.
    #[error("Realtime transport error: {0}")]
    Transport(#[from] TransportError),

    /// The authoritative re-fetch failed. The cache keeps its last good contents.
    #[error("Reconcile of {collection} failed: {source}")]
    Reconcile {
        collection: String,
        #[source]
        source: StoreError,
    },

    /// A pushed payload could not be decoded.
    #[error("Dropped malformed {collection} payload: {message}")]
    MalformedPayload { collection: String, message: String },
}

impl SyncError {
    pub fn reconcile(collection: impl Into<String>, source: StoreError) -> Self {
        SyncError::Reconcile {
            collection: collection.into(),
            source,
        }
    }

    pub fn malformed(collection: impl Into<String>, message: impl ToString) -> Self {
        SyncError::MalformedPayload {
            collection: collection.into(),
            message: message.to_string(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        ErrorCode::SyncFailure
    }
}

impl From<SyncError> for DomainError {
    fn from(err: SyncError) -> Self {
        let collection = match &err {
            SyncError::Reconcile { collection, .. }
            | SyncError::MalformedPayload { collection, .. } => Some(collection.clone()),
            SyncError::Transport(_) => None,
        };
        let domain = DomainError::new(err.code(), err.to_string());
        match collection {
            Some(collection) => domain.with_detail("collection", collection),
            None => domain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_is_a_sync_failure() {
        let errors = [
            SyncError::from(TransportError::Unavailable("down".into())),
            SyncError::reconcile("bookings", StoreError::unavailable("timeout")),
            SyncError::malformed("services", "missing field `id`"),
        ];
        for err in errors {
            assert_eq!(err.code(), ErrorCode::SyncFailure);
        }
    }

    #[test]
    fn domain_error_names_collection() {
        let err: DomainError = SyncError::reconcile("bookings", StoreError::unavailable("x")).into();
        assert_eq!(err.code, ErrorCode::SyncFailure);
        assert_eq!(err.details.get("collection").map(String::as_str), Some("bookings"));
    }
}
