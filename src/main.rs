//! Catalog browser.
//!
//! Lists the active services matching an optional search text:
//!
//! ```bash
//! TRAVEL_MARKETPLACE__BACKEND__URL=https://project.example.co \
//! TRAVEL_MARKETPLACE__BACKEND__ANON_KEY=... \
//!   cargo run -- "walking tour"
//! ```

use std::sync::Arc;

use travel_marketplace::adapters::{PostgrestClient, PostgrestStore};
use travel_marketplace::application::{SearchServicesHandler, SearchServicesQuery};
use travel_marketplace::config::AppConfig;
use travel_marketplace::domain::catalog::ServiceSearch;
use travel_marketplace::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.logging)?;

    tracing::info!(
        backend = %config.backend.url,
        environment = ?config.logging.environment,
        "Configuration loaded"
    );

    let store = Arc::new(PostgrestStore::new(PostgrestClient::new(config.postgrest())?));
    let handler = SearchServicesHandler::new(store.clone(), store);

    let search = match std::env::args().nth(1) {
        Some(text) => ServiceSearch::default().with_text(text),
        None => ServiceSearch::default(),
    };

    let listings = handler.handle(SearchServicesQuery { search }).await?;
    tracing::info!(count = listings.len(), "Search complete");

    for listing in &listings {
        println!(
            "{}  {}  {}  ({})",
            listing.service.id(),
            listing.service.title(),
            listing.service.price(),
            listing.provider_name.as_deref().unwrap_or("unknown provider"),
        );
    }

    Ok(())
}
