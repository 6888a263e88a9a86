//! State machine trait for status enums.
//!
//! Gives booking and service statuses one way of declaring their transition
//! graph and validating a requested move against it.

use super::{DomainError, ErrorCode};

/// Trait for status enums that represent state machines.
///
/// Implementors define the valid transitions and get validated
/// transition methods for free.
///
/// # Example
///
/// ```ignore
/// let next = BookingStatus::Pending.transition_to(BookingStatus::Confirmed)?;
/// assert!(next.is_terminal());
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, DomainError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Light {
        Red,
        Green,
        Off,
    }

    impl StateMachine for Light {
        fn valid_transitions(&self) -> Vec<Self> {
            match self {
                Light::Red => vec![Light::Green, Light::Off],
                Light::Green => vec![Light::Red],
                Light::Off => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        assert_eq!(Light::Red.transition_to(Light::Green), Ok(Light::Green));
    }

    #[test]
    fn transition_to_fails_with_invalid_state_transition_code() {
        let err = Light::Green.transition_to(Light::Off).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn self_transition_is_rejected_unless_listed() {
        assert!(!Light::Red.can_transition_to(&Light::Red));
    }

    #[test]
    fn is_terminal_follows_valid_transitions() {
        assert!(Light::Off.is_terminal());
        assert!(!Light::Red.is_terminal());
    }
}
