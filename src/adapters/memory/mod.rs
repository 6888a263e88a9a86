//! In-memory store adapter.

mod data_store;

pub use data_store::InMemoryDataStore;
