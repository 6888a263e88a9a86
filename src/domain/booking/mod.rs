//! Booking domain module.
//!
//! Booking lifecycle: `Pending` on creation, then `Confirmed` or
//! `Cancelled`, both terminal. Transitions are pure and return the write
//! the caller must commit to the store.

mod aggregate;
mod errors;
mod status;

pub use aggregate::{Booking, BookingWrite};
pub use errors::BookingError;
pub use status::BookingStatus;
