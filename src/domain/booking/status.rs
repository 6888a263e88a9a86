//! BookingStatus enum and its transition graph.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Lifecycle status of a booking.
///
/// `Confirmed` and `Cancelled` are terminal. Bookings are never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 3] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl StateMachine for BookingStatus {
    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            BookingStatus::Pending => vec![BookingStatus::Confirmed, BookingStatus::Cancelled],
            BookingStatus::Confirmed | BookingStatus::Cancelled => vec![],
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::invalid_format("status", format!("unknown booking status '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_moves_to_either_terminal_state() {
        assert!(BookingStatus::Pending.can_transition_to(&BookingStatus::Confirmed));
        assert!(BookingStatus::Pending.can_transition_to(&BookingStatus::Cancelled));
    }

    #[test]
    fn self_transitions_are_invalid() {
        for status in BookingStatus::ALL {
            assert!(!status.can_transition_to(&status));
        }
    }

    #[test]
    fn confirmed_and_cancelled_are_terminal() {
        assert!(BookingStatus::Confirmed.is_terminal());
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(!BookingStatus::Pending.is_terminal());
    }

    #[test]
    fn confirmed_cannot_be_cancelled() {
        assert!(BookingStatus::Confirmed
            .transition_to(BookingStatus::Cancelled)
            .is_err());
    }

    #[test]
    fn parses_backend_strings() {
        assert_eq!("confirmed".parse::<BookingStatus>().unwrap(), BookingStatus::Confirmed);
        assert!("completed".parse::<BookingStatus>().is_err());
    }
}
