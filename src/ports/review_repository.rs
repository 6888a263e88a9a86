//! Review repository port.

use async_trait::async_trait;

use crate::domain::foundation::{ReviewId, ServiceId, UserId};
use crate::domain::review::Review;

use super::StoreError;

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn save(&self, review: &Review) -> Result<(), StoreError>;

    async fn update(&self, review: &Review) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// - `NotFound` if the review doesn't exist
    async fn delete(&self, id: &ReviewId) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, StoreError>;

    /// Reviews of one service, newest first.
    async fn find_by_service(&self, service_id: &ServiceId) -> Result<Vec<Review>, StoreError>;

    /// The author's review of a service, if any.
    async fn find_by_service_and_author(
        &self,
        service_id: &ServiceId,
        author_id: &UserId,
    ) -> Result<Option<Review>, StoreError>;
}
