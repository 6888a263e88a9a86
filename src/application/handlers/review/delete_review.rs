//! DeleteReviewHandler - Removes a review.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, ReviewId};
use crate::domain::review::ReviewError;
use crate::ports::ReviewRepository;

#[derive(Debug, Clone)]
pub struct DeleteReviewCommand {
    pub review_id: ReviewId,
}

/// Handler for review deletion by its author or an admin.
pub struct DeleteReviewHandler {
    reviews: Arc<dyn ReviewRepository>,
}

impl DeleteReviewHandler {
    pub fn new(reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reviews }
    }

    pub async fn handle(
        &self,
        cmd: DeleteReviewCommand,
        metadata: CommandMetadata,
    ) -> Result<(), ReviewError> {
        let review = self
            .reviews
            .find_by_id(&cmd.review_id)
            .await?
            .ok_or(ReviewError::NotFound(cmd.review_id))?;

        review.ensure_deletable_by(metadata.identity())?;
        self.reviews.delete(&cmd.review_id).await?;

        tracing::info!(review_id = %cmd.review_id, "Review deleted");
        Ok(())
    }
}
