//! In-memory implementation of the repository ports.
//!
//! Holds every table in process memory. When a transport is attached,
//! each successful write is echoed back as a row change, the way the
//! hosted backend's change feed does.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::adapters::realtime::InMemoryRealtimeTransport;
use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::catalog::{Service, ServiceCategory};
use crate::domain::foundation::{
    BookingId, ChangeKind, RealtimeEvent, ReviewId, RowChange, ServiceId, Table, Timestamp,
    UserId,
};
use crate::domain::review::Review;
use crate::domain::user::Profile;
use crate::ports::{
    BookingRepository, BookingScope, ProfileRepository, ReviewRepository, ServiceRepository,
    StoreError,
};

#[derive(Default)]
struct Tables {
    services: HashMap<ServiceId, Service>,
    bookings: HashMap<BookingId, Booking>,
    reviews: HashMap<ReviewId, Review>,
    profiles: HashMap<UserId, Profile>,
}

/// Process-local stand-in for the hosted data store.
#[derive(Default)]
pub struct InMemoryDataStore {
    tables: RwLock<Tables>,
    change_feed: Option<Arc<InMemoryRealtimeTransport>>,
}

impl InMemoryDataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Echo every write to `transport` as a row change.
    pub fn with_change_feed(transport: Arc<InMemoryRealtimeTransport>) -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            change_feed: Some(transport),
        }
    }

    /// Seed a profile. Profiles are created by the auth backend on sign-up.
    pub async fn insert_profile(&self, profile: Profile) -> Result<(), StoreError> {
        let record = to_record(&profile)?;
        self.tables
            .write()
            .await
            .profiles
            .insert(profile.id().clone(), profile);
        self.emit(Table::Profiles, ChangeKind::Insert, record, None).await;
        Ok(())
    }

    async fn emit(
        &self,
        table: Table,
        kind: ChangeKind,
        record: serde_json::Value,
        old: Option<serde_json::Value>,
    ) {
        let Some(feed) = &self.change_feed else {
            return;
        };
        let mut change = match kind {
            ChangeKind::Delete => RowChange::new(table, kind, None),
            _ => RowChange::new(table, kind, Some(record.clone())),
        };
        if let Some(old) = old.or_else(|| (kind == ChangeKind::Delete).then_some(record)) {
            change = change.with_old_record(old);
        }
        feed.publish(RealtimeEvent::Change(change)).await;
    }
}

fn to_record<T: Serialize>(value: &T) -> Result<serde_json::Value, StoreError> {
    serde_json::to_value(value).map_err(|e| StoreError::malformed(e.to_string()))
}

fn newest_first<T>(mut rows: Vec<T>, created: impl Fn(&T) -> Timestamp) -> Vec<T> {
    rows.sort_by(|a, b| created(b).cmp(&created(a)));
    rows
}

#[async_trait]
impl ServiceRepository for InMemoryDataStore {
    async fn save(&self, service: &Service) -> Result<(), StoreError> {
        let record = to_record(service)?;
        {
            let mut tables = self.tables.write().await;
            if tables.services.contains_key(service.id()) {
                return Err(StoreError::conflict(format!(
                    "service {} already exists",
                    service.id()
                )));
            }
            tables.services.insert(*service.id(), service.clone());
        }
        self.emit(Table::Services, ChangeKind::Insert, record, None).await;
        Ok(())
    }

    async fn update(&self, service: &Service) -> Result<(), StoreError> {
        let record = to_record(service)?;
        {
            let mut tables = self.tables.write().await;
            let slot = tables
                .services
                .get_mut(service.id())
                .ok_or_else(|| StoreError::not_found("service", service.id()))?;
            *slot = service.clone();
        }
        self.emit(Table::Services, ChangeKind::Update, record, None).await;
        Ok(())
    }

    async fn find_by_id(&self, id: &ServiceId) -> Result<Option<Service>, StoreError> {
        Ok(self.tables.read().await.services.get(id).cloned())
    }

    async fn find_by_provider(&self, provider_id: &UserId) -> Result<Vec<Service>, StoreError> {
        let rows = self
            .tables
            .read()
            .await
            .services
            .values()
            .filter(|s| s.provider_id() == provider_id)
            .cloned()
            .collect();
        Ok(newest_first(rows, |s: &Service| *s.created_at()))
    }

    async fn find_active(
        &self,
        category: Option<ServiceCategory>,
    ) -> Result<Vec<Service>, StoreError> {
        let rows = self
            .tables
            .read()
            .await
            .services
            .values()
            .filter(|s| s.status().is_listed())
            .filter(|s| category.map_or(true, |c| s.category() == c))
            .cloned()
            .collect();
        Ok(newest_first(rows, |s: &Service| *s.created_at()))
    }
}

#[async_trait]
impl BookingRepository for InMemoryDataStore {
    async fn insert(&self, booking: &Booking) -> Result<(), StoreError> {
        let record = to_record(booking)?;
        {
            let mut tables = self.tables.write().await;
            if !tables.services.contains_key(&booking.service_id()) {
                return Err(StoreError::not_found("service", booking.service_id()));
            }
            if tables.bookings.contains_key(&booking.id()) {
                return Err(StoreError::conflict(format!(
                    "booking {} already exists",
                    booking.id()
                )));
            }
            tables.bookings.insert(booking.id(), booking.clone());
        }
        self.emit(Table::Bookings, ChangeKind::Insert, record, None).await;
        Ok(())
    }

    async fn update_status(
        &self,
        id: &BookingId,
        expected: BookingStatus,
        status: BookingStatus,
    ) -> Result<Booking, StoreError> {
        let (updated, old_record) = {
            let mut tables = self.tables.write().await;
            let current = tables
                .bookings
                .get(id)
                .ok_or_else(|| StoreError::not_found("booking", id))?;
            if current.status() != expected {
                return Err(StoreError::conflict(format!(
                    "booking {} is {}, expected {}",
                    id,
                    current.status(),
                    expected
                )));
            }
            let old_record = to_record(current)?;
            let updated = Booking::reconstitute(
                current.id(),
                current.service_id(),
                current.client_id().clone(),
                *current.start(),
                *current.end(),
                current.total_amount(),
                status,
                *current.created_at(),
                Timestamp::now(),
            );
            tables.bookings.insert(*id, updated.clone());
            (updated, old_record)
        };
        let record = to_record(&updated)?;
        self.emit(Table::Bookings, ChangeKind::Update, record, Some(old_record))
            .await;
        Ok(updated)
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, StoreError> {
        Ok(self.tables.read().await.bookings.get(id).cloned())
    }

    async fn list(
        &self,
        scope: &BookingScope,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>, StoreError> {
        let tables = self.tables.read().await;
        let in_scope = |booking: &Booking| match scope {
            BookingScope::Client(client_id) => booking.client_id() == client_id,
            BookingScope::Provider(provider_id) => tables
                .services
                .get(&booking.service_id())
                .map_or(false, |s| s.provider_id() == provider_id),
            BookingScope::All => true,
        };
        let rows = tables
            .bookings
            .values()
            .filter(|b| in_scope(b))
            .filter(|b| status.map_or(true, |s| b.status() == s))
            .cloned()
            .collect();
        Ok(newest_first(rows, |b: &Booking| *b.created_at()))
    }
}

#[async_trait]
impl ReviewRepository for InMemoryDataStore {
    async fn save(&self, review: &Review) -> Result<(), StoreError> {
        let record = to_record(review)?;
        self.tables
            .write()
            .await
            .reviews
            .insert(review.id(), review.clone());
        self.emit(Table::Reviews, ChangeKind::Insert, record, None).await;
        Ok(())
    }

    async fn update(&self, review: &Review) -> Result<(), StoreError> {
        let record = to_record(review)?;
        {
            let mut tables = self.tables.write().await;
            let slot = tables
                .reviews
                .get_mut(&review.id())
                .ok_or_else(|| StoreError::not_found("review", review.id()))?;
            *slot = review.clone();
        }
        self.emit(Table::Reviews, ChangeKind::Update, record, None).await;
        Ok(())
    }

    async fn delete(&self, id: &ReviewId) -> Result<(), StoreError> {
        let removed = self
            .tables
            .write()
            .await
            .reviews
            .remove(id)
            .ok_or_else(|| StoreError::not_found("review", id))?;
        let record = to_record(&removed)?;
        self.emit(Table::Reviews, ChangeKind::Delete, record, None).await;
        Ok(())
    }

    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, StoreError> {
        Ok(self.tables.read().await.reviews.get(id).cloned())
    }

    async fn find_by_service(&self, service_id: &ServiceId) -> Result<Vec<Review>, StoreError> {
        let rows = self
            .tables
            .read()
            .await
            .reviews
            .values()
            .filter(|r| &r.service_id() == service_id)
            .cloned()
            .collect();
        Ok(newest_first(rows, |r: &Review| *r.created_at()))
    }

    async fn find_by_service_and_author(
        &self,
        service_id: &ServiceId,
        author_id: &UserId,
    ) -> Result<Option<Review>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .reviews
            .values()
            .find(|r| &r.service_id() == service_id && r.author_id() == author_id)
            .cloned())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryDataStore {
    async fn update(&self, profile: &Profile) -> Result<(), StoreError> {
        let record = to_record(profile)?;
        {
            let mut tables = self.tables.write().await;
            let slot = tables
                .profiles
                .get_mut(profile.id())
                .ok_or_else(|| StoreError::not_found("profile", profile.id()))?;
            *slot = profile.clone();
        }
        self.emit(Table::Profiles, ChangeKind::Update, record, None).await;
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<Profile>, StoreError> {
        Ok(self.tables.read().await.profiles.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<Profile>, StoreError> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.profiles.get(id).cloned())
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Profile>, StoreError> {
        let rows = self.tables.read().await.profiles.values().cloned().collect();
        Ok(newest_first(rows, |p: &Profile| *p.created_at()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::ServiceStatus;
    use crate::domain::foundation::{Identity, Money, Rating, Role};

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn active_service(provider: &str) -> Service {
        let mut service = Service::new(
            ServiceId::new(),
            user(provider),
            "Kayak rental".to_string(),
            "Half day on the river".to_string(),
            Money::from_cents(3_000),
            ServiceCategory::Activities,
            vec![],
        )
        .unwrap();
        service.set_status(ServiceStatus::Active).unwrap();
        service
    }

    fn booking_for(service: &Service, client: &str) -> Booking {
        let start = Timestamp::now();
        Booking::create(
            service,
            Some(&Identity::new(user(client), Role::Client)),
            start,
            start.plus_hours(4),
            service.price(),
        )
        .unwrap()
        .0
    }

    #[tokio::test]
    async fn update_status_is_compare_and_set() {
        let store = InMemoryDataStore::new();
        let service = active_service("prov-1");
        ServiceRepository::save(&store, &service).await.unwrap();
        let booking = booking_for(&service, "client-1");
        store.insert(&booking).await.unwrap();

        let confirmed = store
            .update_status(&booking.id(), BookingStatus::Pending, BookingStatus::Confirmed)
            .await
            .unwrap();
        assert_eq!(confirmed.status(), BookingStatus::Confirmed);

        let err = store
            .update_status(&booking.id(), BookingStatus::Pending, BookingStatus::Cancelled)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn list_scopes_by_client_and_provider() {
        let store = InMemoryDataStore::new();
        let mine = active_service("prov-1");
        let theirs = active_service("prov-2");
        ServiceRepository::save(&store, &mine).await.unwrap();
        ServiceRepository::save(&store, &theirs).await.unwrap();
        store.insert(&booking_for(&mine, "client-1")).await.unwrap();
        store.insert(&booking_for(&theirs, "client-1")).await.unwrap();
        store.insert(&booking_for(&mine, "client-2")).await.unwrap();

        let client = store
            .list(&BookingScope::Client(user("client-1")), None)
            .await
            .unwrap();
        let provider = store
            .list(&BookingScope::Provider(user("prov-1")), None)
            .await
            .unwrap();
        let pending = store
            .list(&BookingScope::All, Some(BookingStatus::Confirmed))
            .await
            .unwrap();

        assert_eq!(client.len(), 2);
        assert_eq!(provider.len(), 2);
        assert!(pending.is_empty());
    }

    #[tokio::test]
    async fn find_active_hides_pending_services() {
        let store = InMemoryDataStore::new();
        let pending = Service::new(
            ServiceId::new(),
            user("prov-1"),
            "Draft".to_string(),
            "Not yet approved".to_string(),
            Money::ZERO,
            ServiceCategory::Tours,
            vec![],
        )
        .unwrap();
        ServiceRepository::save(&store, &pending).await.unwrap();
        ServiceRepository::save(&store, &active_service("prov-1"))
            .await
            .unwrap();

        assert_eq!(store.find_active(None).await.unwrap().len(), 1);
        assert!(store
            .find_active(Some(ServiceCategory::Tours))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn writes_are_echoed_to_change_feed() {
        let feed = Arc::new(InMemoryRealtimeTransport::new());
        let store = InMemoryDataStore::with_change_feed(feed.clone());
        let service = active_service("prov-1");
        ServiceRepository::save(&store, &service).await.unwrap();

        let events = feed.published_events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            RealtimeEvent::Change(change) => {
                assert_eq!(change.table, Table::Services);
                assert_eq!(change.kind, ChangeKind::Insert);
                assert_eq!(change.row_id(), Some(service.id().to_string().as_str()));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test]
    async fn delete_carries_old_record() {
        let feed = Arc::new(InMemoryRealtimeTransport::new());
        let store = InMemoryDataStore::with_change_feed(feed.clone());
        let review = Review::create(
            ServiceId::new(),
            Some(&Identity::new(user("client-1"), Role::Client)),
            Rating::new(5).unwrap(),
            "Lovely".to_string(),
        )
        .unwrap();
        ReviewRepository::save(&store, &review).await.unwrap();
        store.delete(&review.id()).await.unwrap();

        match feed.published_events().last() {
            Some(RealtimeEvent::Change(change)) => {
                assert_eq!(change.kind, ChangeKind::Delete);
                assert!(change.record.is_none());
                assert!(change.old_record.is_some());
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
}
