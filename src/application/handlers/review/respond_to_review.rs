//! RespondToReviewHandler - Provider replies to a review of their service.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, ReviewId};
use crate::domain::review::{Review, ReviewError};
use crate::ports::{ReviewRepository, ServiceRepository};

#[derive(Debug, Clone)]
pub struct RespondToReviewCommand {
    pub review_id: ReviewId,
    pub response: String,
}

pub struct RespondToReviewHandler {
    services: Arc<dyn ServiceRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl RespondToReviewHandler {
    pub fn new(services: Arc<dyn ServiceRepository>, reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { services, reviews }
    }

    pub async fn handle(
        &self,
        cmd: RespondToReviewCommand,
        metadata: CommandMetadata,
    ) -> Result<Review, ReviewError> {
        let mut review = self
            .reviews
            .find_by_id(&cmd.review_id)
            .await?
            .ok_or(ReviewError::NotFound(cmd.review_id))?;

        let service = self
            .services
            .find_by_id(&review.service_id())
            .await?
            .ok_or(ReviewError::ServiceNotFound(review.service_id()))?;

        review.respond(metadata.identity(), service.provider_id(), cmd.response)?;
        self.reviews.update(&review).await?;

        tracing::info!(review_id = %review.id(), "Provider responded to review");
        Ok(review)
    }
}
