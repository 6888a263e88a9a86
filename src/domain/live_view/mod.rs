//! Live view module.
//!
//! Client-side caches of backend collections kept current by realtime
//! deltas and periodic full reloads.

mod cache;
mod entity;

pub use cache::{LiveViewCache, Snapshot, SortOrder};
pub use entity::Entity;
