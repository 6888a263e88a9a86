//! Marketplace user profile.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Action, AuthorizationContext, Identity, Role, Timestamp, UserId};

use super::UserError;

/// Public profile row for a marketplace user.
///
/// The role stored here mirrors the identity's role claim. Only an admin
/// may change it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    id: UserId,
    #[serde(default)]
    full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(default)]
    role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    avatar_url: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Profile {
    pub fn new(id: UserId, full_name: impl Into<String>, role: Role) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            full_name: full_name.into(),
            email: None,
            role,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_avatar_url(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn is_provider(&self) -> bool {
        self.role == Role::Provider
    }

    /// Admin-only role change. Returns the previous role.
    pub fn change_role(&mut self, actor: Option<&Identity>, role: Role) -> Result<Role, UserError> {
        AuthorizationContext::new(Action::ChangeUserRole, "Profile", self.id.to_string())
            .authorize(actor, Some(&self.id))?;

        let previous = self.role;
        self.role = role;
        self.updated_at = Timestamp::now();
        Ok(previous)
    }
}
