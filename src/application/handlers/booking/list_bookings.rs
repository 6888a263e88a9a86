//! ListBookingsHandler - Query handler for a user's bookings.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError, BookingStatus};
use crate::domain::foundation::CommandMetadata;
use crate::ports::{BookingRepository, BookingScope};

/// Query for the caller's bookings.
///
/// Clients see the bookings they made, providers see bookings on their
/// services, admins see everything.
#[derive(Debug, Clone, Default)]
pub struct ListBookingsQuery {
    pub status: Option<BookingStatus>,
}

/// Handler for listing bookings, newest first.
pub struct ListBookingsHandler {
    bookings: Arc<dyn BookingRepository>,
}

impl ListBookingsHandler {
    pub fn new(bookings: Arc<dyn BookingRepository>) -> Self {
        Self { bookings }
    }

    pub async fn handle(
        &self,
        query: ListBookingsQuery,
        metadata: CommandMetadata,
    ) -> Result<Vec<Booking>, BookingError> {
        let identity = metadata.identity().ok_or_else(|| BookingError::Unauthorized {
            authenticated: false,
            message: "Sign in required".to_string(),
        })?;

        let scope = BookingScope::for_identity(identity);

        let mut bookings = self.bookings.list(&scope, query.status).await?;
        bookings.sort_by(|a, b| b.created_at().cmp(a.created_at()));

        tracing::debug!(
            scope = %scope.label(),
            count = bookings.len(),
            "Listed bookings"
        );
        Ok(bookings)
    }
}
