//! UpdateServiceHandler - Command handler for editing a service listing.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, Service, ServiceUpdate};
use crate::domain::foundation::{Action, AuthorizationContext, CommandMetadata, ServiceId};
use crate::ports::ServiceRepository;

/// Command to change a service's listing fields.
#[derive(Debug, Clone)]
pub struct UpdateServiceCommand {
    pub service_id: ServiceId,
    pub update: ServiceUpdate,
}

/// Result of a successful update.
#[derive(Debug, Clone)]
pub struct UpdateServiceResult {
    pub service: Service,
}

/// Handler for service edits by the owning provider or an admin.
pub struct UpdateServiceHandler {
    repository: Arc<dyn ServiceRepository>,
}

impl UpdateServiceHandler {
    pub fn new(repository: Arc<dyn ServiceRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: UpdateServiceCommand,
        metadata: CommandMetadata,
    ) -> Result<UpdateServiceResult, CatalogError> {
        if cmd.update.is_empty() {
            return Err(CatalogError::validation("update", "No fields to update"));
        }

        let mut service = self
            .repository
            .find_by_id(&cmd.service_id)
            .await?
            .ok_or_else(|| CatalogError::not_found(cmd.service_id))?;

        AuthorizationContext::new(Action::UpdateService, "Service", cmd.service_id.to_string())
            .authorize_owned(metadata.identity(), &service)?;

        service.apply_update(cmd.update)?;
        self.repository.update(&service).await?;

        tracing::info!(service_id = %service.id(), "Service updated");
        Ok(UpdateServiceResult { service })
    }
}
