//! Repository ports over the REST interface.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value as JsonValue};

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::catalog::{Service, ServiceCategory};
use crate::domain::foundation::{BookingId, ReviewId, ServiceId, Table, Timestamp, UserId};
use crate::domain::review::Review;
use crate::domain::user::Profile;
use crate::ports::{
    BookingRepository, BookingScope, ProfileRepository, ReviewRepository, ServiceRepository,
    StoreError,
};

use super::client::{PostgrestClient, Query};

/// Data store backed by the hosted REST endpoint.
pub struct PostgrestStore {
    client: PostgrestClient,
}

impl PostgrestStore {
    pub fn new(client: PostgrestClient) -> Self {
        Self { client }
    }

    async fn first<T: serde::de::DeserializeOwned>(
        &self,
        table: Table,
        query: Query,
    ) -> Result<Option<T>, StoreError> {
        let rows: Vec<T> = self.client.select(table, &query.limit(1)).await?;
        Ok(rows.into_iter().next())
    }

    /// PATCH a whole row by id, failing with `NotFound` if nothing matched.
    async fn replace_row<T: Serialize + Sync>(
        &self,
        table: Table,
        entity: &'static str,
        id: &str,
        row: &T,
    ) -> Result<(), StoreError> {
        let body = serde_json::to_value(row).map_err(|e| StoreError::malformed(e.to_string()))?;
        let updated: Vec<JsonValue> = self
            .client
            .update(table, &Query::new().eq("id", id), &body)
            .await?;
        if updated.is_empty() {
            return Err(StoreError::not_found(entity, id));
        }
        Ok(())
    }
}

fn booking_list_query(scope: &BookingScope, status: Option<BookingStatus>) -> Query {
    let mut query = match scope {
        BookingScope::Client(client_id) => Query::new().select("*").eq("client_id", client_id),
        BookingScope::Provider(provider_id) => Query::new()
            .select("*,services!inner(provider_id)")
            .eq("services.provider_id", provider_id),
        BookingScope::All => Query::new().select("*"),
    };
    if let Some(status) = status {
        query = query.eq("status", status);
    }
    query.order_desc("created_at")
}

#[async_trait]
impl ServiceRepository for PostgrestStore {
    async fn save(&self, service: &Service) -> Result<(), StoreError> {
        self.client.insert(Table::Services, service).await
    }

    async fn update(&self, service: &Service) -> Result<(), StoreError> {
        self.replace_row(Table::Services, "service", &service.id().to_string(), service)
            .await
    }

    async fn find_by_id(&self, id: &ServiceId) -> Result<Option<Service>, StoreError> {
        self.first(Table::Services, Query::new().select("*").eq("id", id))
            .await
    }

    async fn find_by_provider(&self, provider_id: &UserId) -> Result<Vec<Service>, StoreError> {
        let query = Query::new()
            .select("*")
            .eq("provider_id", provider_id)
            .order_desc("created_at");
        self.client.select(Table::Services, &query).await
    }

    async fn find_active(
        &self,
        category: Option<ServiceCategory>,
    ) -> Result<Vec<Service>, StoreError> {
        let mut query = Query::new().select("*").eq("status", "active");
        if let Some(category) = category {
            query = query.eq("category", category.id());
        }
        self.client
            .select(Table::Services, &query.order_desc("created_at"))
            .await
    }
}

#[async_trait]
impl BookingRepository for PostgrestStore {
    async fn insert(&self, booking: &Booking) -> Result<(), StoreError> {
        self.client.insert(Table::Bookings, booking).await
    }

    async fn update_status(
        &self,
        id: &BookingId,
        expected: BookingStatus,
        status: BookingStatus,
    ) -> Result<Booking, StoreError> {
        let query = Query::new().eq("id", id).eq("status", expected);
        let changes = json!({ "status": status, "updated_at": Timestamp::now() });
        let mut updated: Vec<Booking> = self
            .client
            .update(Table::Bookings, &query, &changes)
            .await?;

        if let Some(booking) = updated.pop() {
            return Ok(booking);
        }
        // Nothing matched: either the row is gone or its status moved on.
        match BookingRepository::find_by_id(self, id).await? {
            Some(current) => Err(StoreError::conflict(format!(
                "booking {} is {}, expected {}",
                id,
                current.status(),
                expected
            ))),
            None => Err(StoreError::not_found("booking", id)),
        }
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, StoreError> {
        self.first(Table::Bookings, Query::new().select("*").eq("id", id))
            .await
    }

    async fn list(
        &self,
        scope: &BookingScope,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>, StoreError> {
        self.client
            .select(Table::Bookings, &booking_list_query(scope, status))
            .await
    }
}

#[async_trait]
impl ReviewRepository for PostgrestStore {
    async fn save(&self, review: &Review) -> Result<(), StoreError> {
        self.client.insert(Table::Reviews, review).await
    }

    async fn update(&self, review: &Review) -> Result<(), StoreError> {
        self.replace_row(Table::Reviews, "review", &review.id().to_string(), review)
            .await
    }

    async fn delete(&self, id: &ReviewId) -> Result<(), StoreError> {
        let deleted = self
            .client
            .delete(Table::Reviews, &Query::new().eq("id", id))
            .await?;
        if deleted.is_empty() {
            return Err(StoreError::not_found("review", id));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, StoreError> {
        self.first(Table::Reviews, Query::new().select("*").eq("id", id))
            .await
    }

    async fn find_by_service(&self, service_id: &ServiceId) -> Result<Vec<Review>, StoreError> {
        let query = Query::new()
            .select("*")
            .eq("service_id", service_id)
            .order_desc("created_at");
        self.client.select(Table::Reviews, &query).await
    }

    async fn find_by_service_and_author(
        &self,
        service_id: &ServiceId,
        author_id: &UserId,
    ) -> Result<Option<Review>, StoreError> {
        let query = Query::new()
            .select("*")
            .eq("service_id", service_id)
            .eq("user_id", author_id);
        self.first(Table::Reviews, query).await
    }
}

#[async_trait]
impl ProfileRepository for PostgrestStore {
    async fn update(&self, profile: &Profile) -> Result<(), StoreError> {
        self.replace_row(Table::Profiles, "profile", profile.id().as_str(), profile)
            .await
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<Profile>, StoreError> {
        self.first(Table::Profiles, Query::new().select("*").eq("id", id))
            .await
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<Profile>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = Query::new().select("*").in_list("id", ids);
        self.client.select(Table::Profiles, &query).await
    }

    async fn list_all(&self) -> Result<Vec<Profile>, StoreError> {
        let query = Query::new().select("*").order_desc("created_at");
        self.client.select(Table::Profiles, &query).await
    }
}
