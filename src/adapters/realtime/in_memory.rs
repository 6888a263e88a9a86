//! In-memory realtime transport.
//!
//! Delivers published events synchronously, in publish order, to every
//! subscription whose channel accepts them. Used by the in-memory data
//! store and by tests that need deterministic delivery.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::foundation::RealtimeEvent;
use crate::ports::{
    ChannelSpec, RealtimeHandler, RealtimeTransport, SubscriptionId, TransportError,
};

struct Subscription {
    channel: ChannelSpec,
    handler: Arc<dyn RealtimeHandler>,
}

/// In-process push channel hub.
///
/// # Example
///
/// ```ignore
/// let transport = Arc::new(InMemoryRealtimeTransport::new());
/// let id = transport.subscribe(ChannelSpec::table("bookings", Table::Bookings, None), bridge).await?;
/// transport.publish(RealtimeEvent::Change(change)).await;
/// transport.unsubscribe(id).await?;
/// ```
pub struct InMemoryRealtimeTransport {
    subscriptions: RwLock<HashMap<SubscriptionId, Subscription>>,
    published: RwLock<Vec<RealtimeEvent>>,
}

impl InMemoryRealtimeTransport {
    pub fn new() -> Self {
        Self {
            subscriptions: RwLock::new(HashMap::new()),
            published: RwLock::new(Vec::new()),
        }
    }

    /// Deliver `event` to every matching subscription.
    ///
    /// Returns the number of handlers that received it. Handler errors are
    /// logged and do not stop delivery to the others.
    pub async fn publish(&self, event: RealtimeEvent) -> usize {
        self.published
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(event.clone());

        // Clone handlers to release the lock before awaiting
        let targets: Vec<Arc<dyn RealtimeHandler>> = {
            let subscriptions = self
                .subscriptions
                .read()
                .unwrap_or_else(|e| e.into_inner());
            subscriptions
                .values()
                .filter(|s| s.channel.accepts(&event))
                .map(|s| Arc::clone(&s.handler))
                .collect()
        };

        let delivered = targets.len();
        for handler in targets {
            if let Err(e) = handler.handle(event.clone()).await {
                tracing::error!(
                    handler = handler.name(),
                    event_id = %event.event_id(),
                    error = %e,
                    "Realtime handler failed"
                );
            }
        }
        delivered
    }

    // === Test Helpers ===

    pub fn subscription_count(&self) -> usize {
        self.subscriptions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    /// Names of the channels currently subscribed, sorted.
    pub fn channel_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .subscriptions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .map(|s| s.channel.name.clone())
            .collect();
        names.sort();
        names
    }

    pub fn published_events(&self) -> Vec<RealtimeEvent> {
        self.published
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Default for InMemoryRealtimeTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RealtimeTransport for InMemoryRealtimeTransport {
    async fn subscribe(
        &self,
        channel: ChannelSpec,
        handler: Arc<dyn RealtimeHandler>,
    ) -> Result<SubscriptionId, TransportError> {
        if channel.name.trim().is_empty() {
            return Err(TransportError::Rejected(
                channel.name,
                "channel name is empty".to_string(),
            ));
        }

        let id = SubscriptionId::new();
        tracing::debug!(
            subscription_id = %id,
            channel = %channel.name,
            handler = handler.name(),
            "Realtime channel subscribed"
        );
        self.subscriptions
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(id, Subscription { channel, handler });
        Ok(id)
    }

    async fn unsubscribe(&self, id: SubscriptionId) -> Result<(), TransportError> {
        let removed = self
            .subscriptions
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&id);

        match removed {
            Some(subscription) => {
                tracing::debug!(
                    subscription_id = %id,
                    channel = %subscription.channel.name,
                    "Realtime channel unsubscribed"
                );
                Ok(())
            }
            None => Err(TransportError::UnknownSubscription(id)),
        }
    }
}
