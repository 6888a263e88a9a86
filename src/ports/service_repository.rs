//! Service repository port.
//!
//! Persists and retrieves catalog services. Row-level security in the
//! backend is not relied on; handlers authorize before calling these.

use async_trait::async_trait;

use crate::domain::catalog::{Service, ServiceCategory};
use crate::domain::foundation::{ServiceId, UserId};

use super::StoreError;

/// Repository port for Service persistence.
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// Insert a new service.
    async fn save(&self, service: &Service) -> Result<(), StoreError>;

    /// Overwrite an existing service.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the service doesn't exist
    async fn update(&self, service: &Service) -> Result<(), StoreError>;

    /// Find a service by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &ServiceId) -> Result<Option<Service>, StoreError>;

    /// All services listed by one provider, any status, newest first.
    async fn find_by_provider(&self, provider_id: &UserId) -> Result<Vec<Service>, StoreError>;

    /// Active services, optionally within one category, newest first.
    async fn find_active(
        &self,
        category: Option<ServiceCategory>,
    ) -> Result<Vec<Service>, StoreError>;
}
