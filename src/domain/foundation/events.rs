//! Realtime event types delivered by the hosted backend.
//!
//! Two shapes arrive over push channels:
//! - [`RowChange`] - a row in one of the backend tables was inserted,
//!   updated or deleted. The payload is the raw row, not our joined view.
//! - [`BroadcastMessage`] - an arbitrary payload published on a named
//!   channel (notifications use this).
//!
//! Both are wrapped in [`RealtimeEvent`] for transport.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use uuid::Uuid;

use super::Timestamp;

/// Unique identifier for a delivered event (used for log correlation).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Creates a new random EventId using UUID v4.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Creates an EventId from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Backend tables that emit row changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Services,
    Bookings,
    Reviews,
    Profiles,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Services => "services",
            Table::Bookings => "bookings",
            Table::Reviews => "reviews",
            Table::Profiles => "profiles",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of row change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// Equality filter on one column, e.g. `service_id=eq.<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowFilter {
    pub column: String,
    pub value: String,
}

impl RowFilter {
    pub fn eq(column: impl Into<String>, value: impl ToString) -> Self {
        Self {
            column: column.into(),
            value: value.to_string(),
        }
    }

    /// Returns true if `row` has `column` equal to `value`.
    ///
    /// String and non-string JSON values are compared by their textual form.
    pub fn matches(&self, row: &JsonValue) -> bool {
        match row.get(&self.column) {
            Some(JsonValue::String(s)) => s == &self.value,
            Some(JsonValue::Null) | None => false,
            Some(other) => other.to_string() == self.value,
        }
    }
}

impl fmt::Display for RowFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=eq.{}", self.column, self.value)
    }
}

/// A raw row change from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowChange {
    pub event_id: EventId,
    pub table: Table,
    pub kind: ChangeKind,
    /// New row image (absent for deletes).
    pub record: Option<JsonValue>,
    /// Previous row image, when the backend sends one.
    pub old_record: Option<JsonValue>,
    pub committed_at: Timestamp,
}

impl RowChange {
    pub fn new(table: Table, kind: ChangeKind, record: Option<JsonValue>) -> Self {
        Self {
            event_id: EventId::new(),
            table,
            kind,
            record,
            old_record: None,
            committed_at: Timestamp::now(),
        }
    }

    pub fn with_old_record(mut self, old: JsonValue) -> Self {
        self.old_record = Some(old);
        self
    }

    /// The row image that identifies the changed row (new image, else old).
    pub fn row(&self) -> Option<&JsonValue> {
        self.record.as_ref().or(self.old_record.as_ref())
    }

    /// Reads the `id` column of the changed row.
    pub fn row_id(&self) -> Option<&str> {
        self.row()?.get("id")?.as_str()
    }
}

/// Payload published on a named broadcast channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BroadcastMessage {
    pub event_id: EventId,
    pub channel: String,
    pub event: String,
    pub payload: JsonValue,
    pub sent_at: Timestamp,
}

impl BroadcastMessage {
    pub fn new(channel: impl Into<String>, event: impl Into<String>, payload: JsonValue) -> Self {
        Self {
            event_id: EventId::new(),
            channel: channel.into(),
            event: event.into(),
            payload,
            sent_at: Timestamp::now(),
        }
    }
}

/// Anything a push channel can deliver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RealtimeEvent {
    Change(RowChange),
    Broadcast(BroadcastMessage),
}

impl RealtimeEvent {
    pub fn event_id(&self) -> &EventId {
        match self {
            RealtimeEvent::Change(change) => &change.event_id,
            RealtimeEvent::Broadcast(message) => &message.event_id,
        }
    }
}
