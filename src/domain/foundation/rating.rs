//! Star rating value object (1 to 5).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Review rating, 1 (poor) to 5 (excellent) stars inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Creates a Rating, returning error if out of range.
    pub fn new(stars: u8) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&stars) {
            Ok(Self(stars))
        } else {
            Err(ValidationError::out_of_range(
                "rating",
                Self::MIN as i64,
                Self::MAX as i64,
                stars as i64,
            ))
        }
    }

    /// Returns the number of stars.
    pub fn stars(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_one_through_five() {
        for stars in 1..=5 {
            assert_eq!(Rating::new(stars).unwrap().stars(), stars);
        }
    }

    #[test]
    fn rejects_zero_and_six() {
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(6).is_err());
    }

    #[test]
    fn deserialization_validates_range() {
        assert!(serde_json::from_str::<Rating>("4").is_ok());
        assert!(serde_json::from_str::<Rating>("9").is_err());
    }

    #[test]
    fn display_shows_out_of_five() {
        assert_eq!(Rating::new(3).unwrap().to_string(), "3/5");
    }
}
