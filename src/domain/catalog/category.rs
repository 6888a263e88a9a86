//! Fixed catalog of service categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Category a service is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    Tours,
    Events,
    Accommodations,
    Restaurants,
    Transport,
    Activities,
}

impl ServiceCategory {
    /// Every category, in catalog display order.
    pub const ALL: [ServiceCategory; 6] = [
        ServiceCategory::Tours,
        ServiceCategory::Events,
        ServiceCategory::Accommodations,
        ServiceCategory::Restaurants,
        ServiceCategory::Transport,
        ServiceCategory::Activities,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ServiceCategory::Tours => "tours",
            ServiceCategory::Events => "events",
            ServiceCategory::Accommodations => "accommodations",
            ServiceCategory::Restaurants => "restaurants",
            ServiceCategory::Transport => "transport",
            ServiceCategory::Activities => "activities",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ServiceCategory::Tours => "Tours & Excursions",
            ServiceCategory::Events => "Events & Entertainment",
            ServiceCategory::Accommodations => "Accommodations",
            ServiceCategory::Restaurants => "Restaurants & Dining",
            ServiceCategory::Transport => "Transportation",
            ServiceCategory::Activities => "Activities & Adventures",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ServiceCategory::Tours => "Guided tours and unique local experiences",
            ServiceCategory::Events => "Cultural events, festivals, and shows",
            ServiceCategory::Accommodations => "Hotels, resorts, and unique stays",
            ServiceCategory::Restaurants => "Local cuisine and fine dining experiences",
            ServiceCategory::Transport => "Car rentals, transfers, and travel arrangements",
            ServiceCategory::Activities => "Outdoor activities and adventure sports",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ServiceCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.id() == s)
            .ok_or_else(|| ValidationError::invalid_format("category", format!("unknown category '{}'", s)))
    }
}
