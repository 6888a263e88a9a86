//! SetServiceStatusHandler - Command handler for service moderation.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, Service, ServiceStatus};
use crate::domain::foundation::{Action, AuthorizationContext, CommandMetadata, ServiceId};
use crate::ports::ServiceRepository;

/// Command to approve, suspend or reinstate a service.
#[derive(Debug, Clone)]
pub struct SetServiceStatusCommand {
    pub service_id: ServiceId,
    pub status: ServiceStatus,
}

/// Result of a moderation decision.
#[derive(Debug, Clone)]
pub struct SetServiceStatusResult {
    pub service: Service,
    pub previous_status: ServiceStatus,
}

/// Admin-only handler for the service status graph.
pub struct SetServiceStatusHandler {
    repository: Arc<dyn ServiceRepository>,
}

impl SetServiceStatusHandler {
    pub fn new(repository: Arc<dyn ServiceRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: SetServiceStatusCommand,
        metadata: CommandMetadata,
    ) -> Result<SetServiceStatusResult, CatalogError> {
        let mut service = self
            .repository
            .find_by_id(&cmd.service_id)
            .await?
            .ok_or_else(|| CatalogError::not_found(cmd.service_id))?;

        let previous_status = service.set_status(cmd.status)?;

        AuthorizationContext::new(Action::ModerateService, "Service", cmd.service_id.to_string())
            .authorize_owned(metadata.identity(), &service)?;

        self.repository.update(&service).await?;

        tracing::info!(
            service_id = %service.id(),
            from = %previous_status,
            to = %service.status(),
            "Service status changed"
        );

        Ok(SetServiceStatusResult {
            service,
            previous_status,
        })
    }
}
