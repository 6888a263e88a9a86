//! Review domain module.

mod aggregate;
mod errors;

pub use aggregate::{average_rating, Review};
pub use errors::ReviewError;
