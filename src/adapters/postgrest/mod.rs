//! REST adapter for the hosted data store.

mod client;
mod store;

pub use client::{PostgrestClient, PostgrestConfig, Query};
pub use store::PostgrestStore;
