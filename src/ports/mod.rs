//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Store Ports
//!
//! - `ServiceRepository`, `BookingRepository`, `ReviewRepository`,
//!   `ProfileRepository` - Row persistence per table
//! - `CollectionFetcher` - Full reload of a cached collection
//!
//! ## Realtime Ports
//!
//! - `RealtimeTransport` - Subscribe to row-change and broadcast channels
//! - `RealtimeHandler` - Receiver of pushed events
//!
//! ## Identity Ports
//!
//! - `IdentityProvider` - Current identity, sign in/out, session changes

mod booking_repository;
mod collection_fetcher;
mod identity_provider;
mod profile_repository;
mod realtime_transport;
mod review_repository;
mod service_repository;
mod store_error;

pub use booking_repository::{BookingRepository, BookingScope};
pub use collection_fetcher::CollectionFetcher;
pub use identity_provider::{Credentials, IdentityProvider};
pub use profile_repository::ProfileRepository;
pub use realtime_transport::{
    ChannelSource, ChannelSpec, RealtimeHandler, RealtimeTransport, SubscriptionId,
    TransportError,
};
pub use review_repository::ReviewRepository;
pub use service_repository::ServiceRepository;
pub use store_error::StoreError;
