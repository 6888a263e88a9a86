//! SearchServicesHandler - Public catalog search.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::domain::catalog::{CatalogError, Service, ServiceSearch};
use crate::domain::foundation::UserId;
use crate::ports::{ProfileRepository, ServiceRepository};

/// Query for the public catalog.
#[derive(Debug, Clone, Default)]
pub struct SearchServicesQuery {
    pub search: ServiceSearch,
}

/// A search hit with the provider's display name attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceListing {
    pub service: Service,
    pub provider_name: Option<String>,
}

/// Handler for browsing active services. No sign-in required.
pub struct SearchServicesHandler {
    services: Arc<dyn ServiceRepository>,
    profiles: Arc<dyn ProfileRepository>,
}

impl SearchServicesHandler {
    pub fn new(services: Arc<dyn ServiceRepository>, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { services, profiles }
    }

    pub async fn handle(&self, query: SearchServicesQuery) -> Result<Vec<ServiceListing>, CatalogError> {
        let candidates = self.services.find_active(query.search.category).await?;
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let provider_ids: Vec<UserId> = candidates
            .iter()
            .map(|s| s.provider_id().clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let names: HashMap<UserId, String> = self
            .profiles
            .find_by_ids(&provider_ids)
            .await?
            .into_iter()
            .map(|p| (p.id().clone(), p.full_name().to_string()))
            .collect();

        let listings: Vec<ServiceListing> = candidates
            .into_iter()
            .filter_map(|service| {
                let provider_name = names.get(service.provider_id()).cloned();
                query
                    .search
                    .matches(&service, provider_name.as_deref())
                    .then_some(ServiceListing {
                        service,
                        provider_name,
                    })
            })
            .collect();

        tracing::debug!(hits = listings.len(), "Service search completed");
        Ok(listings)
    }
}
