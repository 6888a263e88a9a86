//! Notification entity as pushed by the backend.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

use crate::domain::foundation::{NotificationId, Timestamp, UserId};

/// Kind of event a notification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Booking,
    Message,
    Review,
    System,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NotificationType::Booking => "booking",
            NotificationType::Message => "message",
            NotificationType::Review => "review",
            NotificationType::System => "system",
        };
        f.write_str(s)
    }
}

/// A message for one user. Created server-side only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    #[serde(rename = "user_id")]
    pub recipient_id: UserId,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
}

impl Notification {
    pub fn new(
        recipient_id: UserId,
        kind: NotificationType,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            recipient_id,
            kind,
            title: title.into(),
            message: message.into(),
            read: false,
            created_at: Timestamp::now(),
            data: None,
        }
    }

    /// Decodes a broadcast payload.
    pub fn from_payload(payload: &JsonValue) -> Result<Self, serde_json::Error> {
        Notification::deserialize(payload)
    }
}
