//! TransitionBookingHandler - Command handler for confirming or cancelling bookings.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError, BookingStatus};
use crate::domain::foundation::{BookingId, CommandMetadata};
use crate::ports::{BookingRepository, ServiceRepository};

use super::write::commit;

/// Command to move a booking to a new status.
#[derive(Debug, Clone)]
pub struct TransitionBookingCommand {
    pub booking_id: BookingId,
    pub target: BookingStatus,
}

/// Result of a successful status change.
#[derive(Debug, Clone)]
pub struct TransitionBookingResult {
    pub booking: Booking,
    pub previous_status: BookingStatus,
}

/// Handler for booking status changes.
pub struct TransitionBookingHandler {
    services: Arc<dyn ServiceRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl TransitionBookingHandler {
    pub fn new(services: Arc<dyn ServiceRepository>, bookings: Arc<dyn BookingRepository>) -> Self {
        Self { services, bookings }
    }

    pub async fn handle(
        &self,
        cmd: TransitionBookingCommand,
        metadata: CommandMetadata,
    ) -> Result<TransitionBookingResult, BookingError> {
        // 1. Load booking
        let booking = self
            .bookings
            .find_by_id(&cmd.booking_id)
            .await?
            .ok_or(BookingError::NotFound(cmd.booking_id))?;

        // 2. Resolve the provider who owns the booked service
        let service = self
            .services
            .find_by_id(&booking.service_id())
            .await?
            .ok_or(BookingError::ServiceNotFound(booking.service_id()))?;

        // 3. Validate and authorize
        let (_, write) = booking.transition(cmd.target, metadata.identity(), service.provider_id())?;

        // 4. Compare-and-set against the status we read
        let updated = commit(self.bookings.as_ref(), write).await.map_err(|err| {
            if err.is_retryable() {
                tracing::warn!(
                    booking_id = %cmd.booking_id,
                    target = %cmd.target,
                    "Booking changed concurrently; status write rejected"
                );
            }
            err
        })?;

        tracing::info!(
            booking_id = %updated.id(),
            from = %booking.status(),
            to = %updated.status(),
            correlation_id = %metadata.correlation_id(),
            "Booking status changed"
        );

        Ok(TransitionBookingResult {
            booking: updated,
            previous_status: booking.status(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryDataStore;
    use crate::domain::catalog::{Service, ServiceCategory, ServiceStatus};
    use crate::domain::foundation::{ErrorCode, Identity, Money, Role, Timestamp, UserId};
    use crate::ports::{BookingScope, StoreError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn identity(id: &str, role: Role) -> Identity {
        Identity::new(UserId::new(id).unwrap(), role)
    }

    fn active_service() -> Service {
        let mut service = Service::new(
            crate::domain::foundation::ServiceId::new(),
            UserId::new("prov-1").unwrap(),
            "Vineyard tasting".to_string(),
            "Afternoon tasting with lunch".to_string(),
            Money::from_cents(9_000),
            ServiceCategory::Activities,
            vec![],
        )
        .unwrap();
        service.set_status(ServiceStatus::Active).unwrap();
        service
    }

    async fn setup() -> (TransitionBookingHandler, Arc<InMemoryDataStore>, Booking) {
        let store = Arc::new(InMemoryDataStore::new());
        let service = active_service();
        ServiceRepository::save(store.as_ref(), &service).await.unwrap();

        let start = Timestamp::now().plus_hours(48);
        let (booking, _) = Booking::create(
            &service,
            Some(&identity("client-1", Role::Client)),
            start,
            start.plus_hours(3),
            service.price(),
        )
        .unwrap();
        store.insert(&booking).await.unwrap();

        let handler = TransitionBookingHandler::new(store.clone(), store.clone());
        (handler, store, booking)
    }

    fn command(booking: &Booking, target: BookingStatus) -> TransitionBookingCommand {
        TransitionBookingCommand {
            booking_id: booking.id(),
            target,
        }
    }

    #[tokio::test]
    async fn provider_confirms_pending_booking() {
        let (handler, store, booking) = setup().await;

        let result = handler
            .handle(
                command(&booking, BookingStatus::Confirmed),
                CommandMetadata::new(identity("prov-1", Role::Provider)),
            )
            .await
            .unwrap();

        assert_eq!(result.previous_status, BookingStatus::Pending);
        assert_eq!(result.booking.status(), BookingStatus::Confirmed);
        let stored = BookingRepository::find_by_id(store.as_ref(), &booking.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status(), BookingStatus::Confirmed);
    }

    #[tokio::test]
    async fn client_cancels_own_booking() {
        let (handler, _, booking) = setup().await;

        let result = handler
            .handle(
                command(&booking, BookingStatus::Cancelled),
                CommandMetadata::new(identity("client-1", Role::Client)),
            )
            .await
            .unwrap();

        assert_eq!(result.booking.status(), BookingStatus::Cancelled);
    }

    #[tokio::test]
    async fn client_cannot_confirm() {
        let (handler, store, booking) = setup().await;

        let err = handler
            .handle(
                command(&booking, BookingStatus::Confirmed),
                CommandMetadata::new(identity("client-1", Role::Client)),
            )
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::Forbidden);
        let stored = BookingRepository::find_by_id(store.as_ref(), &booking.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status(), BookingStatus::Pending);
    }

    #[tokio::test]
    async fn confirmed_booking_cannot_be_cancelled_even_by_admin() {
        let (handler, _, booking) = setup().await;
        handler
            .handle(
                command(&booking, BookingStatus::Confirmed),
                CommandMetadata::new(identity("prov-1", Role::Provider)),
            )
            .await
            .unwrap();

        let err = handler
            .handle(
                command(&booking, BookingStatus::Cancelled),
                CommandMetadata::new(identity("admin", Role::Admin)),
            )
            .await
            .unwrap_err();

        assert_eq!(
            err,
            BookingError::invalid_transition(BookingStatus::Confirmed, BookingStatus::Cancelled)
        );
    }

    #[tokio::test]
    async fn unknown_booking_is_not_found() {
        let (handler, _, _) = setup().await;
        let missing = BookingId::new();

        let err = handler
            .handle(
                TransitionBookingCommand {
                    booking_id: missing,
                    target: BookingStatus::Confirmed,
                },
                CommandMetadata::new(identity("admin", Role::Admin)),
            )
            .await
            .unwrap_err();

        assert_eq!(err, BookingError::NotFound(missing));
    }

    /// Serves a stale read and then loses the compare-and-set.
    struct RacingBookingRepository {
        booking: Booking,
        writes: Mutex<u32>,
    }

    #[async_trait]
    impl BookingRepository for RacingBookingRepository {
        async fn insert(&self, _booking: &Booking) -> Result<(), StoreError> {
            Ok(())
        }

        async fn update_status(
            &self,
            id: &BookingId,
            _expected: BookingStatus,
            _status: BookingStatus,
        ) -> Result<Booking, StoreError> {
            *self.writes.lock().unwrap() += 1;
            Err(StoreError::conflict(format!("booking {} already cancelled", id)))
        }

        async fn find_by_id(&self, _id: &BookingId) -> Result<Option<Booking>, StoreError> {
            Ok(Some(self.booking.clone()))
        }

        async fn list(
            &self,
            _scope: &BookingScope,
            _status: Option<BookingStatus>,
        ) -> Result<Vec<Booking>, StoreError> {
            Ok(vec![self.booking.clone()])
        }
    }

    #[tokio::test]
    async fn lost_race_surfaces_retryable_write_conflict() {
        let (_, store, booking) = setup().await;
        let racing = Arc::new(RacingBookingRepository {
            booking: booking.clone(),
            writes: Mutex::new(0),
        });
        let handler = TransitionBookingHandler::new(store, racing.clone());

        let err = handler
            .handle(
                command(&booking, BookingStatus::Confirmed),
                CommandMetadata::new(identity("prov-1", Role::Provider)),
            )
            .await
            .unwrap_err();

        assert_eq!(err, BookingError::WriteConflict(booking.id()));
        assert!(err.is_retryable());
        assert_eq!(*racing.writes.lock().unwrap(), 1);
    }
}
