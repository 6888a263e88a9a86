//! Travel Marketplace - bookings, reviews and live views for a
//! travel-services marketplace.
//!
//! Clients book services offered by providers; administrators moderate
//! the catalog and user roles. Local views of services, bookings and
//! reviews are kept current from backend change events.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
