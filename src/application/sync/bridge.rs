//! Realtime sync bridge: applies pushed events to local views.
//!
//! Row changes never patch a cache directly. Each one triggers a full
//! re-fetch that replaces the cache wholesale, so a delayed or reordered
//! row can never win over state the store has already reported. Only
//! notification broadcasts, which carry the whole entity, are applied
//! as they arrive.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, RealtimeEvent, RowChange};
use crate::domain::live_view::{Entity, LiveViewCache};
use crate::domain::notification::{Notification, NotificationInbox};
use crate::ports::{CollectionFetcher, RealtimeHandler, StoreError};

use super::SyncError;

/// A cache shared between its bridge (the writer) and readers.
pub type SharedCache<T> = Arc<RwLock<LiveViewCache<T>>>;

/// Counters for recovered sync failures.
#[derive(Debug, Default)]
pub struct SyncStats {
    reconcile_failures: AtomicU64,
    dropped_payloads: AtomicU64,
}

impl SyncStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-fetches that failed and left the cache stale.
    pub fn reconcile_failures(&self) -> u64 {
        self.reconcile_failures.load(Ordering::Relaxed)
    }

    /// Pushed payloads that could not be decoded.
    pub fn dropped_payloads(&self) -> u64 {
        self.dropped_payloads.load(Ordering::Relaxed)
    }

    /// Counts a recovered failure. Transport errors are not counted.
    pub fn record(&self, err: &SyncError) {
        let counter = match err {
            SyncError::Reconcile { .. } => &self.reconcile_failures,
            SyncError::MalformedPayload { .. } => &self.dropped_payloads,
            SyncError::Transport(_) => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Keeps one [`LiveViewCache`] in step with a row-change channel.
pub struct RealtimeSyncBridge<T: Entity> {
    collection: &'static str,
    cache: SharedCache<T>,
    fetcher: Arc<dyn CollectionFetcher<T>>,
    reconcile_timeout: Option<Duration>,
    stats: Arc<SyncStats>,
}

impl<T: Entity> RealtimeSyncBridge<T> {
    pub fn new(
        collection: &'static str,
        cache: SharedCache<T>,
        fetcher: Arc<dyn CollectionFetcher<T>>,
        stats: Arc<SyncStats>,
    ) -> Self {
        Self {
            collection,
            cache,
            fetcher,
            reconcile_timeout: None,
            stats,
        }
    }

    /// Give up on a re-fetch after `timeout`, counting it as a failure.
    pub fn with_reconcile_timeout(mut self, timeout: Duration) -> Self {
        self.reconcile_timeout = Some(timeout);
        self
    }

    pub fn collection(&self) -> &'static str {
        self.collection
    }

    pub fn cache(&self) -> SharedCache<T> {
        self.cache.clone()
    }

    /// Replaces the cache with the authoritative collection.
    ///
    /// On failure the cache keeps its last good contents.
    pub async fn reconcile(&self) -> Result<usize, SyncError> {
        let fetched = match self.reconcile_timeout {
            Some(limit) => tokio::time::timeout(limit, self.fetcher.fetch_all())
                .await
                .unwrap_or_else(|_| {
                    Err(StoreError::unavailable(format!(
                        "fetch timed out after {}ms",
                        limit.as_millis()
                    )))
                }),
            None => self.fetcher.fetch_all().await,
        };
        let rows = fetched.map_err(|e| SyncError::reconcile(self.fetcher.describe(), e))?;
        let count = rows.len();
        self.cache.write().await.reconcile(rows);
        tracing::debug!(collection = self.collection, rows = count, "Reconciled cache");
        Ok(count)
    }

    /// Re-fetches after a row change. Failures are logged and counted.
    pub async fn on_change(&self, change: &RowChange) {
        if let Err(err) = self.reconcile().await {
            self.stats.record(&err);
            tracing::warn!(
                collection = self.collection,
                event_id = %change.event_id,
                error = %err,
                "Sync failed; keeping last known cache"
            );
        }
    }
}

#[async_trait]
impl<T: Entity> RealtimeHandler for RealtimeSyncBridge<T> {
    async fn handle(&self, event: RealtimeEvent) -> Result<(), DomainError> {
        match event {
            RealtimeEvent::Change(change) => self.on_change(&change).await,
            RealtimeEvent::Broadcast(message) => {
                tracing::debug!(
                    collection = self.collection,
                    channel = %message.channel,
                    "Ignoring broadcast on row-change bridge"
                );
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        self.collection
    }
}

/// Delivers notification broadcasts into a user's inbox.
pub struct InboxBridge {
    inbox: Arc<RwLock<NotificationInbox>>,
    stats: Arc<SyncStats>,
}

impl InboxBridge {
    pub fn new(inbox: Arc<RwLock<NotificationInbox>>, stats: Arc<SyncStats>) -> Self {
        Self { inbox, stats }
    }
}

#[async_trait]
impl RealtimeHandler for InboxBridge {
    async fn handle(&self, event: RealtimeEvent) -> Result<(), DomainError> {
        let RealtimeEvent::Broadcast(message) = event else {
            return Ok(());
        };

        match Notification::from_payload(&message.payload) {
            Ok(notification) => {
                tracing::debug!(notification_id = %notification.id, kind = %notification.kind, "Notification received");
                self.inbox.write().await.receive(notification);
            }
            Err(e) => {
                let err = SyncError::malformed("notifications", e);
                self.stats.record(&err);
                tracing::warn!(event_id = %message.event_id, error = %err, "Dropping notification");
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "notifications"
    }
}
