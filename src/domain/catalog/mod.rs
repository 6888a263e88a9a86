//! Catalog domain module.
//!
//! Services listed by providers, their moderation status and the public
//! search filter. Only `Active` services are visible to clients.

mod category;
mod errors;
mod search;
mod service;
mod status;

pub use category::ServiceCategory;
pub use errors::CatalogError;
pub use search::ServiceSearch;
pub use service::{Service, ServiceUpdate, MAX_TITLE_LENGTH};
pub use status::ServiceStatus;
