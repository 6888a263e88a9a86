//! CreateServiceHandler - Command handler for listing a new service.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, Service, ServiceCategory};
use crate::domain::foundation::{
    Action, AuthorizationContext, CommandMetadata, Money, ServiceId,
};
use crate::ports::ServiceRepository;

/// Command to create a service owned by the caller.
#[derive(Debug, Clone)]
pub struct CreateServiceCommand {
    pub title: String,
    pub description: String,
    pub price: Money,
    pub category: ServiceCategory,
    pub images: Vec<String>,
}

/// Result of successful service creation.
#[derive(Debug, Clone)]
pub struct CreateServiceResult {
    pub service: Service,
}

/// Handler for creating services. New services wait for moderation.
pub struct CreateServiceHandler {
    repository: Arc<dyn ServiceRepository>,
}

impl CreateServiceHandler {
    pub fn new(repository: Arc<dyn ServiceRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: CreateServiceCommand,
        metadata: CommandMetadata,
    ) -> Result<CreateServiceResult, CatalogError> {
        let id = ServiceId::new();
        let identity = metadata.identity();

        // 1. Validate fields before anything else
        let provider_id = identity.map(|i| i.id.clone()).ok_or(CatalogError::Unauthenticated)?;
        let service = Service::new(
            id,
            provider_id,
            cmd.title,
            cmd.description,
            cmd.price,
            cmd.category,
            cmd.images,
        )?;

        // 2. Only providers (and admins) list services, always on their own behalf
        AuthorizationContext::new(Action::CreateService, "Service", id.to_string())
            .authorize_owned(identity, &service)?;

        // 3. Persist
        self.repository.save(&service).await?;

        tracing::info!(
            service_id = %service.id(),
            provider_id = %service.provider_id(),
            category = %service.category(),
            "Service created"
        );

        Ok(CreateServiceResult { service })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryDataStore;
    use crate::domain::catalog::ServiceStatus;
    use crate::domain::foundation::{ErrorCode, Identity, Role, UserId};

    fn identity(id: &str, role: Role) -> Identity {
        Identity::new(UserId::new(id).unwrap(), role)
    }

    fn command(title: &str) -> CreateServiceCommand {
        CreateServiceCommand {
            title: title.to_string(),
            description: "Sunset sail around the bay".to_string(),
            price: Money::from_cents(12_000),
            category: ServiceCategory::Tours,
            images: vec!["boats/1.jpg".to_string()],
        }
    }

    #[tokio::test]
    async fn provider_creates_pending_service() {
        let store = Arc::new(InMemoryDataStore::new());
        let handler = CreateServiceHandler::new(store.clone());

        let result = handler
            .handle(
                command("Sunset sail"),
                CommandMetadata::new(identity("prov-1", Role::Provider)),
            )
            .await
            .unwrap();

        assert_eq!(result.service.status(), ServiceStatus::Pending);
        assert_eq!(result.service.provider_id().as_str(), "prov-1");
        let stored = ServiceRepository::find_by_id(store.as_ref(), result.service.id())
            .await
            .unwrap();
        assert!(stored.is_some());
    }

    #[tokio::test]
    async fn clients_cannot_create_services() {
        let store = Arc::new(InMemoryDataStore::new());
        let handler = CreateServiceHandler::new(store.clone());

        let err = handler
            .handle(
                command("Sunset sail"),
                CommandMetadata::new(identity("client-1", Role::Client)),
            )
            .await
            .unwrap_err();

        assert_eq!(err, CatalogError::Forbidden);
        assert!(store.find_active(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_title_is_rejected() {
        let handler = CreateServiceHandler::new(Arc::new(InMemoryDataStore::new()));

        let err = handler
            .handle(
                command("   "),
                CommandMetadata::new(identity("prov-1", Role::Provider)),
            )
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn anonymous_caller_must_sign_in() {
        let handler = CreateServiceHandler::new(Arc::new(InMemoryDataStore::new()));

        let err = handler
            .handle(command("Sunset sail"), CommandMetadata::anonymous())
            .await
            .unwrap_err();

        assert_eq!(err, CatalogError::Unauthenticated);
    }
}
