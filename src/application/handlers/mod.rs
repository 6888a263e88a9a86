//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod booking;
pub mod catalog;
pub mod dashboard;
pub mod review;
pub mod user;

pub use booking::{
    CreateBookingCommand, CreateBookingHandler, CreateBookingResult, ListBookingsHandler,
    ListBookingsQuery, TransitionBookingCommand, TransitionBookingHandler,
    TransitionBookingResult,
};
pub use catalog::{
    CreateServiceCommand, CreateServiceHandler, CreateServiceResult, SearchServicesHandler,
    SearchServicesQuery, ServiceListing, SetServiceStatusCommand, SetServiceStatusHandler,
    SetServiceStatusResult, UpdateServiceCommand, UpdateServiceHandler, UpdateServiceResult,
};
pub use dashboard::GetAdminOverviewHandler;
pub use review::{
    CreateReviewCommand, CreateReviewHandler, CreateReviewResult, DeleteReviewCommand,
    DeleteReviewHandler, RespondToReviewCommand, RespondToReviewHandler, UpdateReviewCommand,
    UpdateReviewHandler,
};
pub use user::{UpdateUserRoleCommand, UpdateUserRoleHandler, UpdateUserRoleResult};
