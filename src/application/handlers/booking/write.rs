//! Commits a [`BookingWrite`] against the repository.

use crate::domain::booking::{Booking, BookingError, BookingWrite};
use crate::ports::{BookingRepository, StoreError};

/// Applies `write` and returns the booking as stored.
///
/// A lost compare-and-set surfaces as `WriteConflict`; it is never retried here.
pub(super) async fn commit(
    repository: &dyn BookingRepository,
    write: BookingWrite,
) -> Result<Booking, BookingError> {
    match write {
        BookingWrite::Insert(booking) => {
            repository.insert(&booking).await?;
            Ok(booking)
        }
        BookingWrite::UpdateStatus {
            id,
            expected,
            status,
        } => repository
            .update_status(&id, expected, status)
            .await
            .map_err(|err| match err {
                StoreError::Conflict(_) => BookingError::WriteConflict(id),
                StoreError::NotFound { .. } => BookingError::NotFound(id),
                other => BookingError::Store(other),
            }),
    }
}
