//! Booking repository port.
//!
//! Status changes go through [`BookingRepository::update_status`], a
//! compare-and-set on the prior status. The store decides write races.

use async_trait::async_trait;

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::{BookingId, Identity, Role, UserId};

use super::StoreError;

/// Whose bookings a listing covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BookingScope {
    /// Bookings made by this client.
    Client(UserId),
    /// Bookings on services listed by this provider.
    Provider(UserId),
    /// Every booking. Admin only.
    All,
}

impl BookingScope {
    /// The bookings `identity` works with: their own as a client, those on
    /// their services as a provider, everything as an admin.
    pub fn for_identity(identity: &Identity) -> Self {
        match identity.role {
            Role::Client => BookingScope::Client(identity.id.clone()),
            Role::Provider => BookingScope::Provider(identity.id.clone()),
            Role::Admin => BookingScope::All,
        }
    }

    pub fn label(&self) -> String {
        match self {
            BookingScope::Client(id) => format!("client:{}", id),
            BookingScope::Provider(id) => format!("provider:{}", id),
            BookingScope::All => "all".to_string(),
        }
    }
}

/// Repository port for Booking persistence.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a new booking.
    async fn insert(&self, booking: &Booking) -> Result<(), StoreError>;

    /// Set `status` only if the stored status still equals `expected`.
    ///
    /// Returns the stored booking after the write.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the booking doesn't exist
    /// - `Conflict` if the stored status differs from `expected`
    async fn update_status(
        &self,
        id: &BookingId,
        expected: BookingStatus,
        status: BookingStatus,
    ) -> Result<Booking, StoreError>;

    /// Find a booking by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, StoreError>;

    /// Bookings within `scope`, optionally filtered by status, newest first.
    async fn list(
        &self,
        scope: &BookingScope,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>, StoreError>;
}
