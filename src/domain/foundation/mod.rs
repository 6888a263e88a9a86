//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, error types, the role
//! evaluator and the realtime event vocabulary of the marketplace domain.

mod authorization;
mod command;
mod errors;
mod events;
mod identity;
mod ids;
mod money;
mod ownership;
mod rating;
mod state_machine;
mod timestamp;

pub use authorization::{
    can_access, can_perform, Action, ActionScope, AuthorizationContext, AuthorizationResult,
};
pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    BroadcastMessage, ChangeKind, EventId, RealtimeEvent, RowChange, RowFilter, Table,
};
pub use identity::{AuthError, Identity, Role};
pub use ids::{BookingId, NotificationId, ReviewId, ServiceId, UserId};
pub use money::Money;
pub use ownership::OwnedByUser;
pub use rating::Rating;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
