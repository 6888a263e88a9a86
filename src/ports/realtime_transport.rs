//! Realtime transport port - push channels from the backend.
//!
//! Two kinds of channel exist: row-change feeds on a table (optionally
//! narrowed by an equality filter) and named broadcast channels. Both are
//! delivered as [`RealtimeEvent`]s to a registered [`RealtimeHandler`].

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, RealtimeEvent, RowFilter, Table};

/// Handle returned by [`RealtimeTransport::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a channel listens to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChannelSource {
    /// Insert/update/delete of rows in `table`.
    Table {
        table: Table,
        filter: Option<RowFilter>,
    },
    /// Named messages pushed on the channel.
    Broadcast { event: String },
}

/// A named channel and what it listens to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelSpec {
    pub name: String,
    pub source: ChannelSource,
}

impl ChannelSpec {
    pub fn table(name: impl Into<String>, table: Table, filter: Option<RowFilter>) -> Self {
        Self {
            name: name.into(),
            source: ChannelSource::Table { table, filter },
        }
    }

    pub fn broadcast(name: impl Into<String>, event: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: ChannelSource::Broadcast {
                event: event.into(),
            },
        }
    }

    /// Returns true if `event` belongs on this channel.
    pub fn accepts(&self, event: &RealtimeEvent) -> bool {
        match (&self.source, event) {
            (ChannelSource::Table { table, filter }, RealtimeEvent::Change(change)) => {
                change.table == *table
                    && match filter {
                        None => true,
                        Some(filter) => change.row().map_or(false, |row| filter.matches(row)),
                    }
            }
            (ChannelSource::Broadcast { event }, RealtimeEvent::Broadcast(message)) => {
                message.channel == self.name && &message.event == event
            }
            _ => false,
        }
    }
}

/// Receiver of realtime events.
///
/// Handlers are invoked one event at a time per subscription and must be
/// idempotent: transports may redeliver.
#[async_trait]
pub trait RealtimeHandler: Send + Sync {
    async fn handle(&self, event: RealtimeEvent) -> Result<(), DomainError>;

    /// Handler name for logging.
    fn name(&self) -> &'static str;
}

/// Errors from subscribing or unsubscribing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("channel '{0}' was rejected: {1}")]
    Rejected(String, String),

    #[error("unknown subscription: {0}")]
    UnknownSubscription(SubscriptionId),

    #[error("transport unavailable: {0}")]
    Unavailable(String),
}

/// Port for subscribing to backend push channels.
#[async_trait]
pub trait RealtimeTransport: Send + Sync {
    /// Start delivering events matching `channel` to `handler`.
    async fn subscribe(
        &self,
        channel: ChannelSpec,
        handler: Arc<dyn RealtimeHandler>,
    ) -> Result<SubscriptionId, TransportError>;

    /// Stop delivery. After this returns no further events reach the handler.
    async fn unsubscribe(&self, id: SubscriptionId) -> Result<(), TransportError>;
}
