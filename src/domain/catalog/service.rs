//! Service aggregate entity.
//!
//! A service is a bookable offering listed by one provider. The provider
//! owns it; only that provider or an admin may change it. Moderation status
//! decides whether it is visible in search and bookable.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, Money, OwnedByUser, ServiceId, StateMachine, Timestamp, UserId, ValidationError,
};

use super::{ServiceCategory, ServiceStatus};

/// Maximum length for a service title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Listed travel service.
///
/// # Invariants
///
/// - `title` is 1-200 characters, non-blank
/// - `description` is non-blank
/// - `price` is non-negative (enforced by [`Money`])
/// - `images` keeps the provider's order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    id: ServiceId,
    provider_id: UserId,
    title: String,
    description: String,
    price: Money,
    category: ServiceCategory,
    status: ServiceStatus,
    #[serde(default)]
    images: Vec<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

/// Partial update of the provider-editable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Money>,
    pub category: Option<ServiceCategory>,
    pub images: Option<Vec<String>>,
}

impl ServiceUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.images.is_none()
    }
}

impl Service {
    /// Creates a new service awaiting moderation.
    ///
    /// # Errors
    ///
    /// - `ValidationError` if title or description is blank, or title too long
    pub fn new(
        id: ServiceId,
        provider_id: UserId,
        title: String,
        description: String,
        price: Money,
        category: ServiceCategory,
        images: Vec<String>,
    ) -> Result<Self, ValidationError> {
        Self::validate_title(&title)?;
        Self::validate_description(&description)?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            provider_id,
            title,
            description,
            price,
            category,
            status: ServiceStatus::Pending,
            images,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a service from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ServiceId,
        provider_id: UserId,
        title: String,
        description: String,
        price: Money,
        category: ServiceCategory,
        status: ServiceStatus,
        images: Vec<String>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            provider_id,
            title,
            description,
            price,
            category,
            status,
            images,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ServiceId {
        &self.id
    }

    pub fn provider_id(&self) -> &UserId {
        &self.provider_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn category(&self) -> ServiceCategory {
        self.category
    }

    pub fn status(&self) -> ServiceStatus {
        self.status
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Returns true if clients can currently book this service.
    pub fn is_bookable(&self) -> bool {
        self.status.is_listed()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Applies a provider edit. Fields left `None` are untouched.
    pub fn apply_update(&mut self, update: ServiceUpdate) -> Result<(), ValidationError> {
        if let Some(title) = &update.title {
            Self::validate_title(title)?;
        }
        if let Some(description) = &update.description {
            Self::validate_description(description)?;
        }

        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(images) = update.images {
            self.images = images;
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Moves the service to a new moderation status.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the move is not in the status graph
    pub fn set_status(&mut self, target: ServiceStatus) -> Result<ServiceStatus, DomainError> {
        let previous = self.status;
        self.status = previous.transition_to(target)?;
        self.updated_at = Timestamp::now();
        Ok(previous)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn validate_title(title: &str) -> Result<(), ValidationError> {
        let len = title.trim().chars().count();
        if len == 0 {
            return Err(ValidationError::empty_field("title"));
        }
        if len > MAX_TITLE_LENGTH {
            return Err(ValidationError::out_of_range(
                "title",
                1,
                MAX_TITLE_LENGTH as i64,
                len as i64,
            ));
        }
        Ok(())
    }

    fn validate_description(description: &str) -> Result<(), ValidationError> {
        if description.trim().is_empty() {
            return Err(ValidationError::empty_field("description"));
        }
        Ok(())
    }
}

impl OwnedByUser for Service {
    fn owner_id(&self) -> &UserId {
        &self.provider_id
    }
}
