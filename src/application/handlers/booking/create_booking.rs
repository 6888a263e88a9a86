//! CreateBookingHandler - Command handler for reserving a service.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError};
use crate::domain::foundation::{CommandMetadata, ServiceId, Timestamp};
use crate::ports::{BookingRepository, ServiceRepository};

use super::write::commit;

/// Command to book a service for a time range.
#[derive(Debug, Clone)]
pub struct CreateBookingCommand {
    pub service_id: ServiceId,
    pub start: Timestamp,
    pub end: Timestamp,
}

/// Result of a successful booking.
#[derive(Debug, Clone)]
pub struct CreateBookingResult {
    pub booking: Booking,
}

/// Handler for creating bookings.
///
/// The service is re-read from the store so availability is checked
/// against its latest known state. The current price becomes the
/// booking's total.
pub struct CreateBookingHandler {
    services: Arc<dyn ServiceRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl CreateBookingHandler {
    pub fn new(services: Arc<dyn ServiceRepository>, bookings: Arc<dyn BookingRepository>) -> Self {
        Self { services, bookings }
    }

    pub async fn handle(
        &self,
        cmd: CreateBookingCommand,
        metadata: CommandMetadata,
    ) -> Result<CreateBookingResult, BookingError> {
        // 1. Load the latest copy of the service
        let service = self
            .services
            .find_by_id(&cmd.service_id)
            .await?
            .ok_or(BookingError::ServiceNotFound(cmd.service_id))?;

        // 2. Validate and authorize
        let (_, write) = Booking::create(
            &service,
            metadata.identity(),
            cmd.start,
            cmd.end,
            service.price(),
        )?;

        // 3. Persist
        let booking = commit(self.bookings.as_ref(), write).await?;

        tracing::info!(
            booking_id = %booking.id(),
            service_id = %booking.service_id(),
            client_id = %booking.client_id(),
            correlation_id = %metadata.correlation_id(),
            "Booking created"
        );

        Ok(CreateBookingResult { booking })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryDataStore;
    use crate::domain::booking::BookingStatus;
    use crate::domain::catalog::{Service, ServiceCategory, ServiceStatus};
    use crate::domain::foundation::{ErrorCode, Identity, Money, Role, UserId};

    fn identity(id: &str, role: Role) -> Identity {
        Identity::new(UserId::new(id).unwrap(), role)
    }

    fn service(status: ServiceStatus) -> Service {
        let mut service = Service::new(
            ServiceId::new(),
            UserId::new("prov-1").unwrap(),
            "Harbour kayak tour".to_string(),
            "Two hours on the water".to_string(),
            Money::from_cents(4_500),
            ServiceCategory::Tours,
            vec![],
        )
        .unwrap();
        if status != ServiceStatus::Pending {
            service.set_status(status).unwrap();
        }
        service
    }

    async fn setup(service: &Service) -> (CreateBookingHandler, Arc<InMemoryDataStore>) {
        let store = Arc::new(InMemoryDataStore::new());
        ServiceRepository::save(store.as_ref(), service).await.unwrap();
        let handler = CreateBookingHandler::new(store.clone(), store.clone());
        (handler, store)
    }

    fn command(service_id: ServiceId, hours: i64) -> CreateBookingCommand {
        let start = Timestamp::now().plus_hours(24);
        CreateBookingCommand {
            service_id,
            start,
            end: start.plus_hours(hours),
        }
    }

    #[tokio::test]
    async fn client_books_active_service_at_current_price() {
        let service = service(ServiceStatus::Active);
        let (handler, store) = setup(&service).await;

        let result = handler
            .handle(
                command(*service.id(), 2),
                CommandMetadata::new(identity("client-1", Role::Client)),
            )
            .await
            .unwrap();

        assert_eq!(result.booking.status(), BookingStatus::Pending);
        assert_eq!(result.booking.total_amount(), Money::from_cents(4_500));
        let stored = BookingRepository::find_by_id(store.as_ref(), &result.booking.id())
            .await
            .unwrap();
        assert_eq!(stored, Some(result.booking));
    }

    #[tokio::test]
    async fn reversed_range_is_rejected_before_any_write() {
        let service = service(ServiceStatus::Active);
        let (handler, store) = setup(&service).await;

        let err = handler
            .handle(
                command(*service.id(), -3),
                CommandMetadata::new(identity("client-1", Role::Client)),
            )
            .await
            .unwrap_err();

        assert_eq!(err, BookingError::InvalidRange);
        let scope = crate::ports::BookingScope::All;
        assert!(store.list(&scope, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn inactive_service_is_unavailable() {
        let service = service(ServiceStatus::Inactive);
        let (handler, _) = setup(&service).await;

        let err = handler
            .handle(
                command(*service.id(), 2),
                CommandMetadata::new(identity("client-1", Role::Client)),
            )
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[tokio::test]
    async fn anonymous_caller_is_unauthorized() {
        let service = service(ServiceStatus::Active);
        let (handler, _) = setup(&service).await;

        let err = handler
            .handle(command(*service.id(), 2), CommandMetadata::anonymous())
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn providers_cannot_book() {
        let service = service(ServiceStatus::Active);
        let (handler, _) = setup(&service).await;

        let err = handler
            .handle(
                command(*service.id(), 2),
                CommandMetadata::new(identity("prov-2", Role::Provider)),
            )
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn unknown_service_is_reported() {
        let service = service(ServiceStatus::Active);
        let (handler, _) = setup(&service).await;
        let missing = ServiceId::new();

        let err = handler
            .handle(
                command(missing, 2),
                CommandMetadata::new(identity("client-1", Role::Client)),
            )
            .await
            .unwrap_err();

        assert_eq!(err, BookingError::ServiceNotFound(missing));
    }
}
