//! Identity provider port.
//!
//! The hosted auth service owns accounts and sessions. This crate only
//! asks who is signed in and listens for changes.

use async_trait::async_trait;
use secrecy::Secret;
use tokio::sync::watch;

use crate::domain::foundation::{AuthError, Identity};

/// Email/password sign-in request.
#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: Secret<String>,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Secret::new(password.into()),
        }
    }
}

/// Port for the external authentication service.
///
/// # Contract
///
/// Implementations must:
/// - Return `Ok(None)` from `current_identity` when nobody is signed in
/// - Publish every sign-in and sign-out on the `watch` channel
/// - Return `AuthError::ServiceUnavailable` for transient errors
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_identity(&self) -> Result<Option<Identity>, AuthError>;

    async fn sign_in(&self, credentials: &Credentials) -> Result<Identity, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Session-change notifications. The current value is the signed-in identity.
    fn watch(&self) -> watch::Receiver<Option<Identity>>;
}
