//! Application layer - Commands, Queries, Handlers and client sync.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! `handlers` hold the write and read use cases; `sync` and `session` keep
//! a client's local views current.

pub mod handlers;
pub mod session;
pub mod sync;

pub use handlers::*;
pub use session::{ClientSession, SessionError, SessionStores};
pub use sync::{RealtimeSyncBridge, SubscriptionRegistry, SyncError, SyncStats};
