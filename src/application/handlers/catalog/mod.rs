//! Service catalog command and query handlers.

mod create_service;
mod search_services;
mod set_service_status;
mod update_service;

pub use create_service::{CreateServiceCommand, CreateServiceHandler, CreateServiceResult};
pub use search_services::{SearchServicesHandler, SearchServicesQuery, ServiceListing};
pub use set_service_status::{
    SetServiceStatusCommand, SetServiceStatusHandler, SetServiceStatusResult,
};
pub use update_service::{UpdateServiceCommand, UpdateServiceHandler, UpdateServiceResult};
