//! Role evaluator: the single place where permission decisions are made.
//!
//! Every gated operation names an [`Action`]. Each action belongs to one
//! [`ActionScope`], and the scope decides which roles may perform it and
//! whether the caller must own the resource:
//!
//! | Scope      | Admin | Provider        | Client          |
//! |------------|-------|-----------------|-----------------|
//! | Provider   | yes   | if owner        | no              |
//! | Client     | yes   | no              | if owner        |
//! | Author     | yes   | if owner        | if owner        |
//! | AdminOnly  | yes   | no              | no              |
//!
//! Unauthenticated callers (`None` identity) are denied everything.
//!
//! [`can_perform`] is the pure predicate. [`AuthorizationContext`] wraps the
//! same decision with the resource description needed for error details and
//! audit logging.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{DomainError, ErrorCode, Identity, OwnedByUser, Role, UserId};

/// Gated marketplace actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    CreateService,
    UpdateService,
    ConfirmBooking,
    DeclineBooking,
    RespondToReview,
    CreateBooking,
    CreateReview,
    CancelOwnBooking,
    UpdateOwnReview,
    DeleteOwnReview,
    ChangeUserRole,
    ModerateService,
    ViewAdminOverview,
}

/// Which roles an action is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionScope {
    Provider,
    Client,
    Author,
    AdminOnly,
}

impl Action {
    pub fn scope(&self) -> ActionScope {
        match self {
            Action::CreateService
            | Action::UpdateService
            | Action::ConfirmBooking
            | Action::DeclineBooking
            | Action::RespondToReview => ActionScope::Provider,
            Action::CreateBooking | Action::CreateReview | Action::CancelOwnBooking => {
                ActionScope::Client
            }
            Action::UpdateOwnReview | Action::DeleteOwnReview => ActionScope::Author,
            Action::ChangeUserRole | Action::ModerateService | Action::ViewAdminOverview => {
                ActionScope::AdminOnly
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::CreateService => "create_service",
            Action::UpdateService => "update_service",
            Action::ConfirmBooking => "confirm_booking",
            Action::DeclineBooking => "decline_booking",
            Action::RespondToReview => "respond_to_review",
            Action::CreateBooking => "create_booking",
            Action::CreateReview => "create_review",
            Action::CancelOwnBooking => "cancel_own_booking",
            Action::UpdateOwnReview => "update_own_review",
            Action::DeleteOwnReview => "delete_own_review",
            Action::ChangeUserRole => "change_user_role",
            Action::ModerateService => "moderate_service",
            Action::ViewAdminOverview => "view_admin_overview",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides whether `identity` may perform `action` on a resource owned by
/// `resource_owner`.
///
/// Pure; no I/O. Non-admin callers need `resource_owner` to equal their own
/// id, so creating something on one's own behalf passes the caller's id.
pub fn can_perform(
    identity: Option<&Identity>,
    action: Action,
    resource_owner: Option<&UserId>,
) -> bool {
    let Some(identity) = identity else {
        return false;
    };

    if identity.role == Role::Admin {
        return true;
    }

    let role_allowed = match action.scope() {
        ActionScope::Provider => identity.role == Role::Provider,
        ActionScope::Client => identity.role == Role::Client,
        ActionScope::Author => true,
        ActionScope::AdminOnly => false,
    };

    role_allowed && resource_owner == Some(&identity.id)
}

/// Route-level guard: may this identity open a view restricted to `allowed_roles`?
///
/// `None` means any authenticated identity is allowed.
pub fn can_access(identity: Option<&Identity>, allowed_roles: Option<&[Role]>) -> bool {
    match (identity, allowed_roles) {
        (None, _) => false,
        (Some(_), None) => true,
        (Some(identity), Some(roles)) => roles.contains(&identity.role),
    }
}

/// Result of an authorization check.
///
/// Contains both the decision and context for logging/auditing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationResult {
    /// Whether access was granted.
    pub granted: bool,

    /// Whether a signed-in identity was present.
    pub authenticated: bool,

    /// The action that was evaluated.
    pub action: Action,

    /// The resource type being accessed (e.g., "Booking", "Service").
    pub resource_type: &'static str,

    /// The ID of the resource being accessed.
    pub resource_id: String,

    /// The caller, if any.
    pub user_id: Option<String>,
}

impl AuthorizationResult {
    /// Converts this result to a `Result<(), DomainError>`.
    ///
    /// Missing identity yields `Unauthorized`, a denied identity `Forbidden`.
    pub fn into_result(self) -> Result<(), DomainError> {
        if self.granted {
            return Ok(());
        }

        let (code, message) = if self.authenticated {
            (ErrorCode::Forbidden, "Not permitted to perform this action")
        } else {
            (ErrorCode::Unauthorized, "Sign in required")
        };

        tracing::debug!(
            action = %self.action,
            resource_type = self.resource_type,
            resource_id = %self.resource_id,
            user_id = self.user_id.as_deref().unwrap_or("anonymous"),
            "Authorization denied"
        );

        Err(DomainError::new(code, message)
            .with_detail("action", self.action.as_str())
            .with_detail("resource_type", self.resource_type)
            .with_detail("resource_id", self.resource_id)
            .with_detail("user_id", self.user_id.unwrap_or_default()))
    }
}

/// Context for authorization decisions.
///
/// Captures the "what" of an authorization request so the decision can be
/// reported with consistent details.
#[derive(Debug, Clone)]
pub struct AuthorizationContext {
    pub action: Action,
    pub resource_type: &'static str,
    pub resource_id: String,
}

impl AuthorizationContext {
    pub fn new(action: Action, resource_type: &'static str, resource_id: impl Into<String>) -> Self {
        Self {
            action,
            resource_type,
            resource_id: resource_id.into(),
        }
    }

    /// Runs the role evaluator for this context.
    pub fn evaluate(
        &self,
        identity: Option<&Identity>,
        resource_owner: Option<&UserId>,
    ) -> AuthorizationResult {
        AuthorizationResult {
            granted: can_perform(identity, self.action, resource_owner),
            authenticated: identity.is_some(),
            action: self.action,
            resource_type: self.resource_type,
            resource_id: self.resource_id.clone(),
            user_id: identity.map(|i| i.id.to_string()),
        }
    }

    /// Shorthand for `evaluate(..).into_result()`.
    pub fn authorize(
        &self,
        identity: Option<&Identity>,
        resource_owner: Option<&UserId>,
    ) -> Result<(), DomainError> {
        self.evaluate(identity, resource_owner).into_result()
    }

    /// Authorizes against the owner of an existing aggregate.
    pub fn authorize_owned<R: OwnedByUser + ?Sized>(
        &self,
        identity: Option<&Identity>,
        resource: &R,
    ) -> Result<(), DomainError> {
        self.authorize(identity, Some(resource.owner_id()))
    }
}
