//! UpdateReviewHandler - Author edits of an existing review.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, Rating, ReviewId};
use crate::domain::review::{Review, ReviewError};
use crate::ports::ReviewRepository;

#[derive(Debug, Clone)]
pub struct UpdateReviewCommand {
    pub review_id: ReviewId,
    pub rating: Option<Rating>,
    pub comment: Option<String>,
}

pub struct UpdateReviewHandler {
    reviews: Arc<dyn ReviewRepository>,
}

impl UpdateReviewHandler {
    pub fn new(reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reviews }
    }

    pub async fn handle(
        &self,
        cmd: UpdateReviewCommand,
        metadata: CommandMetadata,
    ) -> Result<Review, ReviewError> {
        let mut review = self
            .reviews
            .find_by_id(&cmd.review_id)
            .await?
            .ok_or(ReviewError::NotFound(cmd.review_id))?;

        review.edit(metadata.identity(), cmd.rating, cmd.comment)?;
        self.reviews.update(&review).await?;

        tracing::info!(review_id = %review.id(), "Review updated");
        Ok(review)
    }
}
