//! CreateReviewHandler - Command handler for reviewing a service.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, Rating, ServiceId};
use crate::domain::review::{Review, ReviewError};
use crate::ports::{ReviewRepository, ServiceRepository};

/// Command to review a service.
#[derive(Debug, Clone)]
pub struct CreateReviewCommand {
    pub service_id: ServiceId,
    pub rating: Rating,
    pub comment: String,
}

/// Result of a successful review.
#[derive(Debug, Clone)]
pub struct CreateReviewResult {
    pub review: Review,
}

/// Handler for new reviews. Each author reviews a service at most once.
pub struct CreateReviewHandler {
    services: Arc<dyn ServiceRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl CreateReviewHandler {
    pub fn new(services: Arc<dyn ServiceRepository>, reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { services, reviews }
    }

    pub async fn handle(
        &self,
        cmd: CreateReviewCommand,
        metadata: CommandMetadata,
    ) -> Result<CreateReviewResult, ReviewError> {
        if self.services.find_by_id(&cmd.service_id).await?.is_none() {
            return Err(ReviewError::ServiceNotFound(cmd.service_id));
        }

        let review = Review::create(cmd.service_id, metadata.identity(), cmd.rating, cmd.comment)?;

        let existing = self
            .reviews
            .find_by_service_and_author(&cmd.service_id, review.author_id())
            .await?;
        if existing.is_some() {
            return Err(ReviewError::AlreadyReviewed(cmd.service_id));
        }

        self.reviews.save(&review).await?;

        tracing::info!(
            review_id = %review.id(),
            service_id = %review.service_id(),
            rating = review.rating().stars(),
            "Review created"
        );

        Ok(CreateReviewResult { review })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryDataStore;
    use crate::domain::catalog::{Service, ServiceCategory};
    use crate::domain::foundation::{ErrorCode, Identity, Money, Role, UserId};

    fn identity(id: &str, role: Role) -> Identity {
        Identity::new(UserId::new(id).unwrap(), role)
    }

    async fn setup() -> (CreateReviewHandler, Arc<InMemoryDataStore>, ServiceId) {
        let store = Arc::new(InMemoryDataStore::new());
        let service = Service::new(
            ServiceId::new(),
            UserId::new("prov-1").unwrap(),
            "Desert camp night".to_string(),
            "Dinner under the stars".to_string(),
            Money::from_cents(20_000),
            ServiceCategory::Accommodations,
            vec![],
        )
        .unwrap();
        ServiceRepository::save(store.as_ref(), &service).await.unwrap();
        (
            CreateReviewHandler::new(store.clone(), store.clone()),
            store,
            *service.id(),
        )
    }

    fn command(service_id: ServiceId, stars: u8) -> CreateReviewCommand {
        CreateReviewCommand {
            service_id,
            rating: Rating::new(stars).unwrap(),
            comment: "Unforgettable".to_string(),
        }
    }

    #[tokio::test]
    async fn client_reviews_service() {
        let (handler, store, service_id) = setup().await;

        let result = handler
            .handle(
                command(service_id, 5),
                CommandMetadata::new(identity("client-1", Role::Client)),
            )
            .await
            .unwrap();

        assert_eq!(result.review.rating().stars(), 5);
        assert_eq!(store.find_by_service(&service_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn second_review_by_same_author_is_rejected() {
        let (handler, store, service_id) = setup().await;
        let metadata = CommandMetadata::new(identity("client-1", Role::Client));
        handler
            .handle(command(service_id, 5), metadata.clone())
            .await
            .unwrap();

        let err = handler
            .handle(command(service_id, 1), metadata)
            .await
            .unwrap_err();

        assert_eq!(err, ReviewError::AlreadyReviewed(service_id));
        assert_eq!(err.code(), ErrorCode::AlreadyReviewed);
        assert_eq!(store.find_by_service(&service_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn different_authors_may_review_same_service() {
        let (handler, store, service_id) = setup().await;
        for client in ["client-1", "client-2"] {
            handler
                .handle(
                    command(service_id, 4),
                    CommandMetadata::new(identity(client, Role::Client)),
                )
                .await
                .unwrap();
        }
        assert_eq!(store.find_by_service(&service_id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unknown_service_is_reported() {
        let (handler, _, _) = setup().await;
        let missing = ServiceId::new();

        let err = handler
            .handle(
                command(missing, 3),
                CommandMetadata::new(identity("client-1", Role::Client)),
            )
            .await
            .unwrap_err();

        assert_eq!(err, ReviewError::ServiceNotFound(missing));
    }
}
