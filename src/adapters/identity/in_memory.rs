//! In-memory identity provider for tests and local runs.

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use std::collections::HashMap;
use std::sync::RwLock;
use tokio::sync::watch;

use crate::domain::foundation::{AuthError, Identity};
use crate::ports::{Credentials, IdentityProvider};

struct Account {
    password: Secret<String>,
    identity: Identity,
}

/// Fixed set of accounts with one shared "current session".
pub struct InMemoryIdentityProvider {
    accounts: RwLock<HashMap<String, Account>>,
    session: watch::Sender<Option<Identity>>,
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        let (session, _) = watch::channel(None);
        Self {
            accounts: RwLock::new(HashMap::new()),
            session,
        }
    }

    /// Register an account that `sign_in` will accept.
    pub fn with_account(
        self,
        email: impl Into<String>,
        password: impl Into<String>,
        identity: Identity,
    ) -> Self {
        self.accounts
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(
                email.into(),
                Account {
                    password: Secret::new(password.into()),
                    identity,
                },
            );
        self
    }
}

impl Default for InMemoryIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn current_identity(&self) -> Result<Option<Identity>, AuthError> {
        Ok(self.session.borrow().clone())
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Identity, AuthError> {
        let identity = {
            let accounts = self.accounts.read().unwrap_or_else(|e| e.into_inner());
            let account = accounts
                .get(&credentials.email)
                .ok_or(AuthError::InvalidCredentials)?;
            if account.password.expose_secret() != credentials.password.expose_secret() {
                return Err(AuthError::InvalidCredentials);
            }
            account.identity.clone()
        };

        tracing::info!(user_id = %identity.id, role = %identity.role, "Signed in");
        self.session.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if let Some(previous) = self.session.send_replace(None) {
            tracing::info!(user_id = %previous.id, "Signed out");
        }
        Ok(())
    }

    fn watch(&self) -> watch::Receiver<Option<Identity>> {
        self.session.subscribe()
    }
}
