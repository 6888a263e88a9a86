//! Channel definitions for each live collection.

use crate::domain::foundation::{RowFilter, ServiceId, Table, UserId};
use crate::ports::{BookingScope, ChannelSpec};

/// Broadcast event name carrying a notification payload.
pub const NOTIFICATION_EVENT: &str = "notification";

/// Row changes on every service.
pub fn services() -> ChannelSpec {
    ChannelSpec::table("services", Table::Services, None)
}

/// Booking row changes relevant to `scope`.
///
/// Provider bookings are only identifiable through a join on services,
/// so that scope listens to the whole table and relies on reconcile.
pub fn bookings(scope: &BookingScope) -> ChannelSpec {
    let name = format!("bookings:{}", scope.label());
    match scope {
        BookingScope::Client(client_id) => ChannelSpec::table(
            name,
            Table::Bookings,
            Some(RowFilter::eq("client_id", client_id)),
        ),
        BookingScope::Provider(_) | BookingScope::All => {
            ChannelSpec::table(name, Table::Bookings, None)
        }
    }
}

/// Review row changes for one service.
pub fn reviews(service_id: &ServiceId) -> ChannelSpec {
    ChannelSpec::table(
        format!("reviews:{}", service_id),
        Table::Reviews,
        Some(RowFilter::eq("service_id", service_id)),
    )
}

/// Per-user notification broadcasts.
pub fn notifications(user_id: &UserId) -> ChannelSpec {
    ChannelSpec::broadcast(format!("notifications:{}", user_id), NOTIFICATION_EVENT)
}
