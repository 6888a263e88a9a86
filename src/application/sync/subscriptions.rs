//! Tracks live subscriptions so each collection has at most one.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::ports::{ChannelSpec, RealtimeHandler, RealtimeTransport, SubscriptionId};

use super::SyncError;

/// An active subscription. Dropping the handle does not unsubscribe.
pub struct SubscriptionHandle {
    id: SubscriptionId,
    channel: ChannelSpec,
    transport: Arc<dyn RealtimeTransport>,
}

impl SubscriptionHandle {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn channel(&self) -> &ChannelSpec {
        &self.channel
    }

    /// Stops delivery on this channel.
    pub async fn unsubscribe(self) -> Result<(), SyncError> {
        self.transport.unsubscribe(self.id).await?;
        tracing::debug!(channel = %self.channel.name, subscription_id = %self.id, "Unsubscribed");
        Ok(())
    }
}

/// Outcome of [`SubscriptionRegistry::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscribed {
    pub id: SubscriptionId,
    /// True when a new channel was opened. False when the collection was
    /// already on the requested channel.
    pub switched: bool,
}

/// Registry of subscriptions keyed by collection.
///
/// Subscribing a collection to a new channel unsubscribes its previous
/// channel first. Re-subscribing to the same channel is a no-op.
pub struct SubscriptionRegistry {
    transport: Arc<dyn RealtimeTransport>,
    active: Mutex<HashMap<&'static str, SubscriptionHandle>>,
}

impl SubscriptionRegistry {
    pub fn new(transport: Arc<dyn RealtimeTransport>) -> Self {
        Self {
            transport,
            active: Mutex::new(HashMap::new()),
        }
    }

    /// Points `collection` at `channel`, replacing any earlier scope.
    pub async fn subscribe(
        &self,
        collection: &'static str,
        channel: ChannelSpec,
        handler: Arc<dyn RealtimeHandler>,
    ) -> Result<Subscribed, SyncError> {
        let mut active = self.active.lock().await;

        if let Some(existing) = active.get(collection) {
            if existing.channel == channel {
                return Ok(Subscribed {
                    id: existing.id,
                    switched: false,
                });
            }
        }
        if let Some(previous) = active.remove(collection) {
            previous.unsubscribe().await?;
        }

        let id = self.transport.subscribe(channel.clone(), handler).await?;
        tracing::debug!(collection, channel = %channel.name, subscription_id = %id, "Subscribed");
        active.insert(
            collection,
            SubscriptionHandle {
                id,
                channel,
                transport: self.transport.clone(),
            },
        );
        Ok(Subscribed { id, switched: true })
    }

    /// Drops the subscription for `collection`, if any.
    pub async fn unsubscribe(&self, collection: &'static str) -> Result<bool, SyncError> {
        let previous = self.active.lock().await.remove(collection);
        match previous {
            Some(handle) => {
                handle.unsubscribe().await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Drops every subscription. Continues past failures and returns the first.
    pub async fn unsubscribe_all(&self) -> Result<(), SyncError> {
        let handles: Vec<SubscriptionHandle> =
            self.active.lock().await.drain().map(|(_, h)| h).collect();

        let mut first_error = None;
        for handle in handles {
            let channel = handle.channel.name.clone();
            if let Err(err) = handle.unsubscribe().await {
                tracing::warn!(channel = %channel, error = %err, "Failed to unsubscribe");
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    pub async fn len(&self) -> usize {
        self.active.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.active.lock().await.is_empty()
    }
}
