//! Command infrastructure for application handlers.
//!
//! Every handler takes a [`CommandMetadata`] next to its command. It carries
//! the acting identity (or none, for anonymous calls) and tracing context,
//! so handlers never reach into global session state for "who is calling".

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Identity;

/// Metadata context for command handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The identity executing this command. `None` when signed out.
    pub identity: Option<Identity>,

    /// Links related operations across a single user intent.
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    /// Source of this command (e.g., "dashboard", "service_details").
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl CommandMetadata {
    /// Creates metadata for a signed-in identity.
    pub fn new(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
            correlation_id: None,
            source: None,
        }
    }

    /// Creates metadata for a signed-out caller.
    pub fn anonymous() -> Self {
        Self {
            identity: None,
            correlation_id: None,
            source: None,
        }
    }

    /// Builder: Add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Builder: Add source identifier.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the acting identity, if signed in.
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Returns the correlation ID, generating one if absent.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    /// Returns the source, if set.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}
