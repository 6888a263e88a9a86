//! Ownership trait for user-owned resources.
//!
//! Services are owned by their provider, bookings by the client that made
//! them and reviews by their author. The role evaluator only needs the owner
//! id, so aggregates expose it through this trait and handlers pass the
//! aggregate to [`AuthorizationContext::authorize_owned`](super::AuthorizationContext::authorize_owned).

use super::UserId;

/// Trait for aggregates that have a single owner.
pub trait OwnedByUser {
    /// Returns the ID of the user who owns this resource.
    fn owner_id(&self) -> &UserId;
}
