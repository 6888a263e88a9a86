//! Authoritative fetches used by reconciling bridges.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::booking::Booking;
use crate::domain::catalog::Service;
use crate::domain::foundation::ServiceId;
use crate::domain::review::Review;
use crate::ports::{
    BookingRepository, BookingScope, CollectionFetcher, ReviewRepository, ServiceRepository,
    StoreError,
};

/// Bookings visible to one scope.
pub struct BookingScopeFetcher {
    repository: Arc<dyn BookingRepository>,
    scope: BookingScope,
}

impl BookingScopeFetcher {
    pub fn new(repository: Arc<dyn BookingRepository>, scope: BookingScope) -> Self {
        Self { repository, scope }
    }
}

#[async_trait]
impl CollectionFetcher<Booking> for BookingScopeFetcher {
    async fn fetch_all(&self) -> Result<Vec<Booking>, StoreError> {
        self.repository.list(&self.scope, None).await
    }

    fn describe(&self) -> String {
        format!("bookings:{}", self.scope.label())
    }
}

/// Reviews of one service.
pub struct ServiceReviewsFetcher {
    repository: Arc<dyn ReviewRepository>,
    service_id: ServiceId,
}

impl ServiceReviewsFetcher {
    pub fn new(repository: Arc<dyn ReviewRepository>, service_id: ServiceId) -> Self {
        Self {
            repository,
            service_id,
        }
    }
}

#[async_trait]
impl CollectionFetcher<Review> for ServiceReviewsFetcher {
    async fn fetch_all(&self) -> Result<Vec<Review>, StoreError> {
        self.repository.find_by_service(&self.service_id).await
    }

    fn describe(&self) -> String {
        format!("reviews:{}", self.service_id)
    }
}

/// Publicly listed services.
pub struct ActiveServicesFetcher {
    repository: Arc<dyn ServiceRepository>,
}

impl ActiveServicesFetcher {
    pub fn new(repository: Arc<dyn ServiceRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CollectionFetcher<Service> for ActiveServicesFetcher {
    async fn fetch_all(&self) -> Result<Vec<Service>, StoreError> {
        self.repository.find_active(None).await
    }

    fn describe(&self) -> String {
        "services:active".to_string()
    }
}
