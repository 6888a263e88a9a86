//! Admin dashboard summary.

use serde::Serialize;

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::{Money, Timestamp};
use crate::domain::user::Profile;

/// Headline numbers on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverview {
    pub total_users: usize,
    pub total_bookings: usize,
    /// Profiles whose role is `provider`.
    pub active_providers: usize,
    /// Sum of `total_amount` over confirmed bookings only.
    pub total_revenue: Money,
    pub generated_at: Timestamp,
}

impl AdminOverview {
    pub fn compute(profiles: &[Profile], bookings: &[Booking]) -> Self {
        let total_revenue = bookings
            .iter()
            .filter(|b| b.status() == BookingStatus::Confirmed)
            .map(Booking::total_amount)
            .sum();

        Self {
            total_users: profiles.len(),
            total_bookings: bookings.len(),
            active_providers: profiles.iter().filter(|p| p.is_provider()).count(),
            total_revenue,
            generated_at: Timestamp::now(),
        }
    }
}
