//! Per-session state container for a signed-in client.
//!
//! A [`ClientSession`] owns the identity, the live caches and the inbox
//! for one user session and wires them to realtime channels. Nothing
//! here is process-global: callers hold the session and pass it on.

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::domain::booking::Booking;
use crate::domain::catalog::Service;
use crate::domain::foundation::{AuthError, ErrorCode, Identity, ServiceId};
use crate::domain::live_view::{Entity, LiveViewCache, SortOrder};
use crate::domain::notification::NotificationInbox;
use crate::domain::review::Review;
use crate::ports::{
    BookingRepository, BookingScope, ChannelSpec, CollectionFetcher, Credentials, IdentityProvider,
    RealtimeTransport, ReviewRepository, ServiceRepository,
};

use super::sync::{
    channels, ActiveServicesFetcher, BookingScopeFetcher, InboxBridge, RealtimeSyncBridge,
    ServiceReviewsFetcher, SharedCache, SubscriptionRegistry, SyncError, SyncStats,
};

const SERVICES: &str = "services";
const BOOKINGS: &str = "bookings";
const REVIEWS: &str = "reviews";
const NOTIFICATIONS: &str = "notifications";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error("Sign in required")]
    NotSignedIn,
}

impl SessionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::Auth(_) | SessionError::NotSignedIn => ErrorCode::Unauthorized,
            SessionError::Sync(err) => err.code(),
        }
    }
}

/// Repositories the session reads from when reconciling.
#[derive(Clone)]
pub struct SessionStores {
    pub services: Arc<dyn ServiceRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
}

pub struct ClientSession {
    identity_provider: Arc<dyn IdentityProvider>,
    stores: SessionStores,
    identity: RwLock<Option<Identity>>,
    services: SharedCache<Service>,
    bookings: SharedCache<Booking>,
    reviews: SharedCache<Review>,
    inbox: Arc<RwLock<NotificationInbox>>,
    subscriptions: SubscriptionRegistry,
    stats: Arc<SyncStats>,
    reconcile_timeout: Option<Duration>,
}

impl ClientSession {
    pub fn new(
        identity_provider: Arc<dyn IdentityProvider>,
        transport: Arc<dyn RealtimeTransport>,
        stores: SessionStores,
    ) -> Self {
        Self {
            identity_provider,
            stores,
            identity: RwLock::new(None),
            services: Arc::new(RwLock::new(LiveViewCache::new(SortOrder::NewestFirst))),
            bookings: Arc::new(RwLock::new(LiveViewCache::new(SortOrder::NewestFirst))),
            reviews: Arc::new(RwLock::new(LiveViewCache::new(SortOrder::NewestFirst))),
            inbox: Arc::new(RwLock::new(NotificationInbox::new())),
            subscriptions: SubscriptionRegistry::new(transport),
            stats: Arc::new(SyncStats::new()),
            reconcile_timeout: None,
        }
    }

    /// Bound every re-fetch made for this session's views.
    pub fn with_reconcile_timeout(mut self, timeout: Duration) -> Self {
        self.reconcile_timeout = Some(timeout);
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Sign-in lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Resumes an existing backend session, if there is one.
    pub async fn restore(&self) -> Result<Option<Identity>, SessionError> {
        match self.identity_provider.current_identity().await? {
            Some(identity) => {
                self.start(identity.clone()).await?;
                Ok(Some(identity))
            }
            None => Ok(None),
        }
    }

    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Identity, SessionError> {
        let identity = self.identity_provider.sign_in(credentials).await?;
        self.start(identity.clone()).await?;
        Ok(identity)
    }

    /// Clears identity, caches and inbox and drops every subscription.
    ///
    /// Local state is cleared even if the identity service fails.
    pub async fn sign_out(&self) -> Result<(), SessionError> {
        let unsubscribed = self.subscriptions.unsubscribe_all().await;

        *self.identity.write().await = None;
        self.bookings.write().await.clear();
        self.reviews.write().await.clear();
        self.services.write().await.clear();
        self.inbox.write().await.clear();

        let signed_out = self.identity_provider.sign_out().await;
        tracing::info!("Session signed out");

        signed_out?;
        unsubscribed?;
        Ok(())
    }

    async fn start(&self, identity: Identity) -> Result<(), SessionError> {
        *self.identity.write().await = Some(identity.clone());

        let inbox = Arc::new(InboxBridge::new(self.inbox.clone(), self.stats.clone()));
        self.subscriptions
            .subscribe(NOTIFICATIONS, channels::notifications(&identity.id), inbox)
            .await?;

        self.watch_bookings(BookingScope::for_identity(&identity)).await?;

        tracing::info!(user_id = %identity.id, role = %identity.role, "Session started");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Live collections
    // ─────────────────────────────────────────────────────────────────────────

    /// Follows bookings for `scope`, replacing any previous scope.
    pub async fn watch_bookings(&self, scope: BookingScope) -> Result<(), SessionError> {
        let channel = channels::bookings(&scope);
        let fetcher = Arc::new(BookingScopeFetcher::new(self.stores.bookings.clone(), scope));
        self.follow(BOOKINGS, &self.bookings, channel, fetcher).await
    }

    /// Follows the public catalog.
    pub async fn watch_services(&self) -> Result<(), SessionError> {
        let fetcher = Arc::new(ActiveServicesFetcher::new(self.stores.services.clone()));
        self.follow(SERVICES, &self.services, channels::services(), fetcher)
            .await
    }

    /// Follows reviews of `service_id`, replacing the previously watched service.
    pub async fn watch_reviews(&self, service_id: ServiceId) -> Result<(), SessionError> {
        let fetcher = Arc::new(ServiceReviewsFetcher::new(self.stores.reviews.clone(), service_id));
        self.follow(REVIEWS, &self.reviews, channels::reviews(&service_id), fetcher)
            .await
    }

    /// Points `collection` at `channel` and loads it.
    ///
    /// Rows from a previous scope never outlive a channel switch: the cache
    /// is emptied before the first fetch, so a failed fetch shows nothing
    /// rather than another scope's rows.
    async fn follow<T: Entity>(
        &self,
        collection: &'static str,
        cache: &SharedCache<T>,
        channel: ChannelSpec,
        fetcher: Arc<dyn CollectionFetcher<T>>,
    ) -> Result<(), SessionError> {
        let mut bridge =
            RealtimeSyncBridge::new(collection, cache.clone(), fetcher, self.stats.clone());
        if let Some(timeout) = self.reconcile_timeout {
            bridge = bridge.with_reconcile_timeout(timeout);
        }
        let bridge = Arc::new(bridge);

        let subscribed = self
            .subscriptions
            .subscribe(collection, channel, bridge.clone())
            .await?;
        if subscribed.switched {
            cache.write().await.clear();
        }

        self.initial_load(collection, bridge.reconcile().await);
        Ok(())
    }

    /// Initial fetch failures leave the view stale; the next change retries.
    fn initial_load(&self, collection: &'static str, outcome: Result<usize, SyncError>) {
        if let Err(err) = outcome {
            self.stats.record(&err);
            tracing::warn!(collection, error = %err, "Initial load failed");
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn identity(&self) -> Option<Identity> {
        self.identity.read().await.clone()
    }

    pub async fn require_identity(&self) -> Result<Identity, SessionError> {
        self.identity().await.ok_or(SessionError::NotSignedIn)
    }

    pub fn services(&self) -> SharedCache<Service> {
        self.services.clone()
    }

    pub fn bookings(&self) -> SharedCache<Booking> {
        self.bookings.clone()
    }

    pub fn reviews(&self) -> SharedCache<Review> {
        self.reviews.clone()
    }

    pub fn inbox(&self) -> Arc<RwLock<NotificationInbox>> {
        self.inbox.clone()
    }

    pub fn sync_stats(&self) -> Arc<SyncStats> {
        self.stats.clone()
    }

    pub fn subscriptions(&self) -> &SubscriptionRegistry {
        &self.subscriptions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryDataStore, InMemoryIdentityProvider, InMemoryRealtimeTransport};
    use crate::domain::foundation::{
        BroadcastMessage, Rating, RealtimeEvent, ReviewId, Role, UserId,
    };
    use crate::domain::notification::{Notification, NotificationType};
    use crate::ports::StoreError;
    use async_trait::async_trait;

    /// Review store that cannot list one service's reviews.
    struct UnreachableService {
        inner: Arc<InMemoryDataStore>,
        broken: ServiceId,
    }

    #[async_trait]
    impl ReviewRepository for UnreachableService {
        async fn save(&self, review: &Review) -> Result<(), StoreError> {
            ReviewRepository::save(self.inner.as_ref(), review).await
        }

        async fn update(&self, review: &Review) -> Result<(), StoreError> {
            ReviewRepository::update(self.inner.as_ref(), review).await
        }

        async fn delete(&self, id: &ReviewId) -> Result<(), StoreError> {
            ReviewRepository::delete(self.inner.as_ref(), id).await
        }

        async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, StoreError> {
            ReviewRepository::find_by_id(self.inner.as_ref(), id).await
        }

        async fn find_by_service(&self, service_id: &ServiceId) -> Result<Vec<Review>, StoreError> {
            if *service_id == self.broken {
                return Err(StoreError::unavailable("reviews offline"));
            }
            ReviewRepository::find_by_service(self.inner.as_ref(), service_id).await
        }

        async fn find_by_service_and_author(
            &self,
            service_id: &ServiceId,
            author_id: &UserId,
        ) -> Result<Option<Review>, StoreError> {
            ReviewRepository::find_by_service_and_author(self.inner.as_ref(), service_id, author_id)
                .await
        }
    }

    struct Harness {
        session: ClientSession,
        transport: Arc<InMemoryRealtimeTransport>,
    }

    fn harness() -> Harness {
        let transport = Arc::new(InMemoryRealtimeTransport::new());
        let store = Arc::new(InMemoryDataStore::with_change_feed(transport.clone()));
        let identity = Identity::new(UserId::new("client-1").unwrap(), Role::Client);
        let provider = Arc::new(
            InMemoryIdentityProvider::new().with_account("ana@example.com", "s3cret", identity),
        );
        let stores = SessionStores {
            services: store.clone(),
            bookings: store.clone(),
            reviews: store,
        };
        Harness {
            session: ClientSession::new(provider, transport.clone(), stores),
            transport,
        }
    }

    #[tokio::test]
    async fn sign_in_subscribes_inbox_and_bookings() {
        let h = harness();

        let identity = h
            .session
            .sign_in(&Credentials::new("ana@example.com", "s3cret"))
            .await
            .unwrap();

        assert_eq!(identity.role, Role::Client);
        assert_eq!(
            h.transport.channel_names(),
            vec![
                "bookings:client:client-1".to_string(),
                "notifications:client-1".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn wrong_password_leaves_session_signed_out() {
        let h = harness();

        let err = h
            .session
            .sign_in(&Credentials::new("ana@example.com", "guess"))
            .await
            .unwrap_err();

        assert_eq!(err, SessionError::Auth(AuthError::InvalidCredentials));
        assert!(h.session.identity().await.is_none());
        assert_eq!(h.transport.subscription_count(), 0);
    }

    #[tokio::test]
    async fn restore_without_backend_session_is_none() {
        let h = harness();
        assert_eq!(h.session.restore().await.unwrap(), None);
        assert_eq!(
            h.session.require_identity().await.unwrap_err(),
            SessionError::NotSignedIn
        );
    }

    #[tokio::test]
    async fn sign_out_clears_state_and_subscriptions() {
        let h = harness();
        h.session
            .sign_in(&Credentials::new("ana@example.com", "s3cret"))
            .await
            .unwrap();
        let notification = Notification::new(
            UserId::new("client-1").unwrap(),
            NotificationType::System,
            "Welcome",
            "Thanks for joining",
        );
        h.transport
            .publish(RealtimeEvent::Broadcast(BroadcastMessage::new(
                "notifications:client-1",
                "notification",
                serde_json::to_value(&notification).unwrap(),
            )))
            .await;
        assert_eq!(h.session.inbox().read().await.unread_count(), 1);

        h.session.sign_out().await.unwrap();

        assert!(h.session.identity().await.is_none());
        assert!(h.session.inbox().read().await.is_empty());
        assert_eq!(h.transport.subscription_count(), 0);
        assert!(h.session.subscriptions().is_empty().await);
    }

    #[tokio::test]
    async fn failed_load_after_scope_change_shows_no_stale_rows() {
        let transport = Arc::new(InMemoryRealtimeTransport::new());
        let store = Arc::new(InMemoryDataStore::with_change_feed(transport.clone()));
        let reviewed = ServiceId::new();
        let broken = ServiceId::new();
        let author = Identity::new(UserId::new("client-1").unwrap(), Role::Client);
        let review = Review::create(
            reviewed,
            Some(&author),
            Rating::new(4).unwrap(),
            "Great guide".to_string(),
        )
        .unwrap();
        ReviewRepository::save(store.as_ref(), &review).await.unwrap();

        let session = ClientSession::new(
            Arc::new(InMemoryIdentityProvider::new()),
            transport,
            SessionStores {
                services: store.clone(),
                bookings: store.clone(),
                reviews: Arc::new(UnreachableService {
                    inner: store,
                    broken,
                }),
            },
        );

        session.watch_reviews(reviewed).await.unwrap();
        assert_eq!(session.reviews().read().await.len(), 1);

        session.watch_reviews(broken).await.unwrap();

        assert!(session.reviews().read().await.is_empty());
        assert_eq!(session.sync_stats().reconcile_failures(), 1);
    }
}
