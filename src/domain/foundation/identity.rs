//! Identity types for the domain layer.
//!
//! An [`Identity`] is what the hosted identity provider tells us about the
//! signed-in user: an opaque id plus a single role claim carried in the
//! user metadata. The role is trusted as delivered; nothing here re-derives it.
//!
//! Unauthenticated callers are represented by the *absence* of an identity
//! (`Option<&Identity>`), never by a special role.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::UserId;

/// Marketplace role. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Client,
    Provider,
    Admin,
}

impl Role {
    /// All roles, in privilege order.
    pub const ALL: [Role; 3] = [Role::Client, Role::Provider, Role::Admin];

    /// Wire name of the role (matches the metadata claim).
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Provider => "provider",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(Role::Client),
            "provider" => Ok(Role::Provider),
            "admin" => Ok(Role::Admin),
            other => Err(AuthError::InvalidRoleClaim(other.to_string())),
        }
    }
}

/// Authenticated user as seen by this core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub role: Role,
}

impl Identity {
    /// Creates an identity from its parts.
    pub fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    /// Builds an identity from the provider's user id and metadata object.
    ///
    /// The metadata must carry a `role` string claim.
    pub fn from_metadata(id: &str, metadata: &JsonValue) -> Result<Self, AuthError> {
        let id = UserId::new(id).map_err(|_| AuthError::InvalidToken)?;
        let role = metadata
            .get("role")
            .and_then(JsonValue::as_str)
            .ok_or(AuthError::MissingRoleClaim)?
            .parse()?;
        Ok(Self { id, role })
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_provider(&self) -> bool {
        self.role == Role::Provider
    }

    pub fn is_client(&self) -> bool {
        self.role == Role::Client
    }
}

/// Authentication errors surfaced by the identity collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The session token is missing, malformed or expired.
    #[error("Invalid or expired session")]
    InvalidToken,

    /// Email and password did not match an account.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The identity carries no role claim.
    #[error("Identity metadata has no role claim")]
    MissingRoleClaim,

    /// The role claim is not one of client/provider/admin.
    #[error("Unknown role claim: {0}")]
    InvalidRoleClaim(String),

    /// The identity service could not be reached.
    #[error("Identity service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}
