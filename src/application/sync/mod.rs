//! Realtime synchronization of local views.
//!
//! - `channels` - which backend channel feeds each collection
//! - `subscriptions` - at most one live subscription per collection
//! - `bridge` - applies pushed events to caches and the inbox
//! - `fetchers` - authoritative re-fetches for reconciling collections

pub mod bridge;
pub mod channels;
mod error;
pub mod fetchers;
pub mod subscriptions;

pub use bridge::{InboxBridge, RealtimeSyncBridge, SharedCache, SyncStats};
pub use error::SyncError;
pub use fetchers::{ActiveServicesFetcher, BookingScopeFetcher, ServiceReviewsFetcher};
pub use subscriptions::{Subscribed, SubscriptionHandle, SubscriptionRegistry};
