//! GetAdminOverviewHandler - Marketplace totals for administrators.

use std::sync::Arc;

use crate::domain::dashboard::AdminOverview;
use crate::domain::foundation::{Action, AuthorizationContext, CommandMetadata};
use crate::domain::user::UserError;
use crate::ports::{BookingRepository, BookingScope, ProfileRepository};

/// Handler for the admin overview.
///
/// Loads every profile and booking and aggregates in memory.
pub struct GetAdminOverviewHandler {
    profiles: Arc<dyn ProfileRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl GetAdminOverviewHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>, bookings: Arc<dyn BookingRepository>) -> Self {
        Self { profiles, bookings }
    }

    pub async fn handle(&self, metadata: CommandMetadata) -> Result<AdminOverview, UserError> {
        AuthorizationContext::new(Action::ViewAdminOverview, "AdminOverview", "marketplace")
            .authorize(metadata.identity(), None)?;

        let (profiles, bookings) = futures::try_join!(
            self.profiles.list_all(),
            self.bookings.list(&BookingScope::All, None)
        )?;

        Ok(AdminOverview::compute(&profiles, &bookings))
    }
}
