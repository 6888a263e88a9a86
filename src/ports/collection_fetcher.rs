//! Full-collection fetch used to reconcile live caches.

use async_trait::async_trait;

use super::StoreError;

/// Loads the authoritative contents of one cached collection.
///
/// Used when a pushed change cannot be applied as a delta, e.g. rows
/// whose presentation joins other tables.
#[async_trait]
pub trait CollectionFetcher<T>: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<T>, StoreError>;

    /// Short label for logs, e.g. `bookings:client:u-1`.
    fn describe(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_fetcher_is_object_safe() {
        fn _accepts_dyn(_fetcher: &dyn CollectionFetcher<String>) {}
    }
}
