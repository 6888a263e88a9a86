//! Keyed entities that can live in a [`LiveViewCache`](super::LiveViewCache).

use std::fmt::Debug;
use std::hash::Hash;

use crate::domain::booking::Booking;
use crate::domain::catalog::Service;
use crate::domain::foundation::{BookingId, NotificationId, ReviewId, ServiceId, Timestamp};
use crate::domain::notification::Notification;
use crate::domain::review::Review;

/// An entity with a stable id and a creation time.
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Clone + Eq + Hash + Debug + Send + Sync;

    fn entity_id(&self) -> Self::Id;

    fn created_at(&self) -> Timestamp;
}

impl Entity for Service {
    type Id = ServiceId;

    fn entity_id(&self) -> ServiceId {
        *self.id()
    }

    fn created_at(&self) -> Timestamp {
        *Service::created_at(self)
    }
}

impl Entity for Booking {
    type Id = BookingId;

    fn entity_id(&self) -> BookingId {
        self.id()
    }

    fn created_at(&self) -> Timestamp {
        *Booking::created_at(self)
    }
}

impl Entity for Review {
    type Id = ReviewId;

    fn entity_id(&self) -> ReviewId {
        self.id()
    }

    fn created_at(&self) -> Timestamp {
        *Review::created_at(self)
    }
}

impl Entity for Notification {
    type Id = NotificationId;

    fn entity_id(&self) -> NotificationId {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}
