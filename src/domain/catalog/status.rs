//! ServiceStatus enum controlling marketplace visibility.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Moderation status of a listed service.
///
/// Only `Active` services appear in public search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    #[default]
    Pending,
    Active,
    Inactive,
}

impl ServiceStatus {
    /// Returns true if the service is publicly listed and bookable.
    pub fn is_listed(&self) -> bool {
        matches!(self, ServiceStatus::Active)
    }
}

impl StateMachine for ServiceStatus {
    /// Valid transitions:
    /// - Pending -> Active | Inactive
    /// - Active -> Inactive
    /// - Inactive -> Active
    fn valid_transitions(&self) -> Vec<Self> {
        use ServiceStatus::*;
        match self {
            Pending => vec![Active, Inactive],
            Active => vec![Inactive],
            Inactive => vec![Active],
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ServiceStatus::Pending => "pending",
            ServiceStatus::Active => "active",
            ServiceStatus::Inactive => "inactive",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_pending() {
        assert_eq!(ServiceStatus::default(), ServiceStatus::Pending);
    }

    #[test]
    fn only_active_is_listed() {
        assert!(ServiceStatus::Active.is_listed());
        assert!(!ServiceStatus::Pending.is_listed());
        assert!(!ServiceStatus::Inactive.is_listed());
    }

    #[test]
    fn pending_cannot_return_to_pending() {
        assert!(!ServiceStatus::Active.can_transition_to(&ServiceStatus::Pending));
        assert!(!ServiceStatus::Inactive.can_transition_to(&ServiceStatus::Pending));
    }

    #[test]
    fn active_and_inactive_toggle() {
        assert!(ServiceStatus::Active.can_transition_to(&ServiceStatus::Inactive));
        assert!(ServiceStatus::Inactive.can_transition_to(&ServiceStatus::Active));
    }

    #[test]
    fn no_status_is_terminal() {
        assert!(!ServiceStatus::Pending.is_terminal());
        assert!(!ServiceStatus::Active.is_terminal());
        assert!(!ServiceStatus::Inactive.is_terminal());
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(serde_json::to_string(&ServiceStatus::Active).unwrap(), "\"active\"");
    }
}
