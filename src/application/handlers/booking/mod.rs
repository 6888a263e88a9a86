//! Booking command and query handlers.

mod create_booking;
mod list_bookings;
mod transition_booking;
mod write;

pub use create_booking::{CreateBookingCommand, CreateBookingHandler, CreateBookingResult};
pub use list_bookings::{ListBookingsHandler, ListBookingsQuery};
pub use transition_booking::{
    TransitionBookingCommand, TransitionBookingHandler, TransitionBookingResult,
};
