//! Review entity.
//!
//! The author owns the rating and comment. The provider of the reviewed
//! service owns only the `provider_response` field.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    Action, AuthorizationContext, Identity, OwnedByUser, Rating, ReviewId, ServiceId, Timestamp,
    UserId, ValidationError,
};

use super::ReviewError;

/// A client's rating and comment on a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    id: ReviewId,
    service_id: ServiceId,
    #[serde(rename = "user_id")]
    author_id: UserId,
    rating: Rating,
    comment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    provider_response: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Review {
    /// Creates a review authored by `author`.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the comment is blank
    /// - `Unauthenticated`/`Forbidden` if `author` may not write reviews
    pub fn create(
        service_id: ServiceId,
        author: Option<&Identity>,
        rating: Rating,
        comment: String,
    ) -> Result<Self, ReviewError> {
        validate_text("comment", &comment)?;

        let id = ReviewId::new();
        AuthorizationContext::new(Action::CreateReview, "Review", id.to_string())
            .authorize(author, author.map(|a| &a.id))?;
        let author_id = author
            .map(|a| a.id.clone())
            .ok_or(ReviewError::Unauthenticated)?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            service_id,
            author_id,
            rating,
            comment,
            provider_response: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a review from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ReviewId,
        service_id: ServiceId,
        author_id: UserId,
        rating: Rating,
        comment: String,
        provider_response: Option<String>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            service_id,
            author_id,
            rating,
            comment,
            provider_response,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> ReviewId {
        self.id
    }

    pub fn service_id(&self) -> ServiceId {
        self.service_id
    }

    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn provider_response(&self) -> Option<&str> {
        self.provider_response.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Author edit of rating and/or comment.
    pub fn edit(
        &mut self,
        actor: Option<&Identity>,
        rating: Option<Rating>,
        comment: Option<String>,
    ) -> Result<(), ReviewError> {
        if let Some(comment) = &comment {
            validate_text("comment", comment)?;
        }
        self.authorize(Action::UpdateOwnReview, actor, self.owner_id())?;

        if let Some(rating) = rating {
            self.rating = rating;
        }
        if let Some(comment) = comment {
            self.comment = comment;
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Sets the provider's public response. Replaces any earlier response.
    pub fn respond(
        &mut self,
        actor: Option<&Identity>,
        service_provider_id: &UserId,
        response: String,
    ) -> Result<(), ReviewError> {
        validate_text("provider_response", &response)?;
        self.authorize(Action::RespondToReview, actor, service_provider_id)?;

        self.provider_response = Some(response);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Checks that `actor` may delete this review.
    pub fn ensure_deletable_by(&self, actor: Option<&Identity>) -> Result<(), ReviewError> {
        self.authorize(Action::DeleteOwnReview, actor, self.owner_id())
    }

    fn authorize(
        &self,
        action: Action,
        actor: Option<&Identity>,
        owner: &UserId,
    ) -> Result<(), ReviewError> {
        AuthorizationContext::new(action, "Review", self.id.to_string())
            .authorize(actor, Some(owner))
            .map_err(ReviewError::from)
    }
}

impl OwnedByUser for Review {
    fn owner_id(&self) -> &UserId {
        &self.author_id
    }
}

/// Mean star rating, or `0.0` for no reviews.
pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let total: u32 = reviews.iter().map(|r| u32::from(r.rating.stars())).sum();
    f64::from(total) / reviews.len() as f64
}

fn validate_text(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ErrorCode, Role};

    fn identity(id: &str, role: Role) -> Identity {
        Identity::new(UserId::new(id).unwrap(), role)
    }

    fn review(stars: u8) -> Review {
        Review::create(
            ServiceId::new(),
            Some(&identity("client-1", Role::Client)),
            Rating::new(stars).unwrap(),
            "Great guide".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn create_requires_comment() {
        let err = Review::create(
            ServiceId::new(),
            Some(&identity("client-1", Role::Client)),
            Rating::new(4).unwrap(),
            "  ".to_string(),
        )
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }

    #[test]
    fn providers_cannot_write_reviews() {
        let err = Review::create(
            ServiceId::new(),
            Some(&identity("prov-1", Role::Provider)),
            Rating::new(5).unwrap(),
            "Self promotion".to_string(),
        )
        .unwrap_err();
        assert_eq!(err, ReviewError::Forbidden);
    }

    #[test]
    fn author_edits_rating_and_comment() {
        let mut review = review(3);
        review
            .edit(
                Some(&identity("client-1", Role::Client)),
                Some(Rating::new(5).unwrap()),
                None,
            )
            .unwrap();
        assert_eq!(review.rating().stars(), 5);
        assert_eq!(review.comment(), "Great guide");
    }

    #[test]
    fn stranger_cannot_edit() {
        let mut review = review(3);
        let err = review
            .edit(Some(&identity("client-2", Role::Client)), None, Some("x".into()))
            .unwrap_err();
        assert_eq!(err, ReviewError::Forbidden);
        assert_eq!(review.comment(), "Great guide");
    }

    #[test]
    fn service_provider_responds() {
        let mut review = review(4);
        let provider = UserId::new("prov-1").unwrap();
        review
            .respond(
                Some(&identity("prov-1", Role::Provider)),
                &provider,
                "Thank you!".to_string(),
            )
            .unwrap();
        assert_eq!(review.provider_response(), Some("Thank you!"));
    }

    #[test]
    fn other_provider_cannot_respond() {
        let mut review = review(4);
        let provider = UserId::new("prov-1").unwrap();
        let err = review
            .respond(
                Some(&identity("prov-2", Role::Provider)),
                &provider,
                "Hi".to_string(),
            )
            .unwrap_err();
        assert_eq!(err, ReviewError::Forbidden);
    }

    #[test]
    fn author_and_admin_may_delete() {
        let review = review(2);
        assert!(review
            .ensure_deletable_by(Some(&identity("client-1", Role::Client)))
            .is_ok());
        assert!(review
            .ensure_deletable_by(Some(&identity("admin", Role::Admin)))
            .is_ok());
        assert_eq!(
            review.ensure_deletable_by(None).unwrap_err(),
            ReviewError::Unauthenticated
        );
    }

    #[test]
    fn average_of_no_reviews_is_zero() {
        assert_eq!(average_rating(&[]), 0.0);
    }

    #[test]
    fn average_rating_is_mean_of_stars() {
        let reviews = vec![review(5), review(4), review(3)];
        assert!((average_rating(&reviews) - 4.0).abs() < f64::EPSILON);
    }
}
