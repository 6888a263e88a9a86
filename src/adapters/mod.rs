//! Adapters - Implementations of port interfaces.
//!
//! - `memory` - In-memory data store with an optional change feed
//! - `realtime` - In-process realtime transport
//! - `identity` - In-memory identity provider
//! - `postgrest` - REST client for the hosted data store

pub mod identity;
pub mod memory;
pub mod postgrest;
pub mod realtime;

pub use identity::InMemoryIdentityProvider;
pub use memory::InMemoryDataStore;
pub use postgrest::{PostgrestClient, PostgrestConfig, PostgrestStore, Query};
pub use realtime::InMemoryRealtimeTransport;
