//! Booking aggregate and its lifecycle rules.
//!
//! Creation and transitions are pure: they return the next value and a
//! [`BookingWrite`] describing what the caller must commit. Persisting the
//! write, and learning that it lost a race, is the caller's job.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::Service;
use crate::domain::foundation::{
    Action, AuthorizationContext, BookingId, Identity, Money, OwnedByUser, Role, ServiceId,
    StateMachine, Timestamp, UserId,
};

use super::{BookingError, BookingStatus};

/// A client's reservation of a service for a time range.
///
/// # Invariants
///
/// - `end >= start`
/// - `total_amount` is the service price at creation and never recomputed
/// - status only moves along the [`BookingStatus`] graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    id: BookingId,
    service_id: ServiceId,
    client_id: UserId,
    #[serde(rename = "start_date")]
    start: Timestamp,
    #[serde(rename = "end_date")]
    end: Timestamp,
    total_amount: Money,
    status: BookingStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
}

/// Side effect a booking operation asks the caller to commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingWrite {
    /// Insert a newly created booking.
    Insert(Booking),
    /// Compare-and-set the status of an existing booking.
    UpdateStatus {
        id: BookingId,
        expected: BookingStatus,
        status: BookingStatus,
    },
}

impl Booking {
    /// Creates a pending booking for `client` against `service`.
    ///
    /// Checks run in order: range, service availability, then authorization.
    /// `service` is the caller's latest known copy; the store remains the
    /// authority on whether the service is still active.
    ///
    /// # Errors
    ///
    /// - `InvalidRange` if `end < start`
    /// - `ServiceUnavailable` if the service is not active
    /// - `Unauthorized` if `client` is missing or may not book
    pub fn create(
        service: &Service,
        client: Option<&Identity>,
        start: Timestamp,
        end: Timestamp,
        price_snapshot: Money,
    ) -> Result<(Booking, BookingWrite), BookingError> {
        if end.is_before(&start) {
            return Err(BookingError::InvalidRange);
        }
        if !service.is_bookable() {
            return Err(BookingError::ServiceUnavailable(*service.id()));
        }

        let id = BookingId::new();
        AuthorizationContext::new(Action::CreateBooking, "Booking", id.to_string())
            .authorize(client, client.map(|c| &c.id))?;

        let client_id = client
            .map(|c| c.id.clone())
            .ok_or_else(|| BookingError::Unauthorized {
                authenticated: false,
                message: "Sign in required".to_string(),
            })?;

        let now = Timestamp::now();
        let booking = Booking {
            id,
            service_id: *service.id(),
            client_id,
            start,
            end,
            total_amount: price_snapshot,
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        Ok((booking.clone(), BookingWrite::Insert(booking)))
    }

    /// Reconstitute a booking from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: BookingId,
        service_id: ServiceId,
        client_id: UserId,
        start: Timestamp,
        end: Timestamp,
        total_amount: Money,
        status: BookingStatus,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            service_id,
            client_id,
            start,
            end,
            total_amount,
            status,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> BookingId {
        self.id
    }

    pub fn service_id(&self) -> ServiceId {
        self.service_id
    }

    pub fn client_id(&self) -> &UserId {
        &self.client_id
    }

    pub fn start(&self) -> &Timestamp {
        &self.start
    }

    pub fn end(&self) -> &Timestamp {
        &self.end
    }

    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Computes the booking after moving to `target`.
    ///
    /// Validity is checked before authorization, so a terminal booking
    /// reports `InvalidTransition` to every caller.
    ///
    /// - the provider owning the service may confirm or cancel
    /// - the booking's client may cancel
    /// - an admin may perform any valid transition
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` if `target` is not reachable from the current status
    /// - `Unauthorized` for any other actor
    pub fn transition(
        &self,
        target: BookingStatus,
        actor: Option<&Identity>,
        service_provider_id: &UserId,
    ) -> Result<(Booking, BookingWrite), BookingError> {
        if !self.status.can_transition_to(&target) {
            return Err(BookingError::invalid_transition(self.status, target));
        }

        let (action, owner) = self.required_permission(target, actor, service_provider_id);
        AuthorizationContext::new(action, "Booking", self.id.to_string())
            .authorize(actor, Some(owner))?;

        let mut next = self.clone();
        next.status = target;
        next.updated_at = Timestamp::now();

        let write = BookingWrite::UpdateStatus {
            id: self.id,
            expected: self.status,
            status: target,
        };
        Ok((next, write))
    }

    /// Picks the action and resource owner the evaluator must approve.
    fn required_permission<'a>(
        &'a self,
        target: BookingStatus,
        actor: Option<&Identity>,
        service_provider_id: &'a UserId,
    ) -> (Action, &'a UserId) {
        let client_cancelling = target == BookingStatus::Cancelled
            && actor.map_or(false, |a| a.role == Role::Client);

        if client_cancelling {
            (Action::CancelOwnBooking, &self.client_id)
        } else if target == BookingStatus::Confirmed {
            (Action::ConfirmBooking, service_provider_id)
        } else {
            (Action::DeclineBooking, service_provider_id)
        }
    }
}

impl OwnedByUser for Booking {
    fn owner_id(&self) -> &UserId {
        &self.client_id
    }
}
