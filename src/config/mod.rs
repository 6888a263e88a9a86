//! Application configuration module
//!
//! Configuration is read from environment variables with the
//! `TRAVEL_MARKETPLACE` prefix, using `__` to separate nested values. A
//! `.env` file is loaded first when present.
//!
//! # Example
//!
//! ```no_run
//! use travel_marketplace::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Backend at {}", config.backend.url);
//! ```

mod backend;
mod error;
mod logging;
mod realtime;

pub use backend::BackendConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::{Environment, LoggingConfig};
pub use realtime::RealtimeConfig;

use serde::Deserialize;

use crate::adapters::PostgrestConfig;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Hosted data store connection
    pub backend: BackendConfig,

    /// Live view reconciliation
    #[serde(default)]
    pub realtime: RealtimeConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variable Format
    ///
    /// - `TRAVEL_MARKETPLACE__BACKEND__URL=...` -> `backend.url = ...`
    /// - `TRAVEL_MARKETPLACE__LOGGING__JSON=true` -> `logging.json = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TRAVEL_MARKETPLACE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.logging.validate()?;
        self.backend.validate(&self.logging.environment)?;
        self.realtime.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.logging.is_production()
    }

    /// Connection settings for the REST data client
    pub fn postgrest(&self) -> PostgrestConfig {
        PostgrestConfig::new(self.backend.url.clone(), self.backend.anon_key.clone())
            .with_timeout(self.backend.timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;
    use std::time::Duration;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("TRAVEL_MARKETPLACE__BACKEND__URL", "https://project.example.co");
        env::set_var("TRAVEL_MARKETPLACE__BACKEND__ANON_KEY", "anon-key");
    }

    fn clear_env() {
        env::remove_var("TRAVEL_MARKETPLACE__BACKEND__URL");
        env::remove_var("TRAVEL_MARKETPLACE__BACKEND__ANON_KEY");
        env::remove_var("TRAVEL_MARKETPLACE__BACKEND__TIMEOUT_SECS");
        env::remove_var("TRAVEL_MARKETPLACE__REALTIME__RECONCILE_TIMEOUT_MS");
        env::remove_var("TRAVEL_MARKETPLACE__LOGGING__ENVIRONMENT");
        env::remove_var("TRAVEL_MARKETPLACE__LOGGING__JSON");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.backend.url, "https://project.example.co");
        assert_eq!(config.backend.anon_key.expose_secret(), "anon-key");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.backend.timeout(), Duration::from_secs(30));
        assert_eq!(config.realtime.reconcile_timeout(), Duration::from_secs(10));
        assert_eq!(config.logging.environment, Environment::Development);
        assert!(!config.logging.json);
    }

    #[test]
    fn test_missing_backend_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("TRAVEL_MARKETPLACE__BACKEND__TIMEOUT_SECS", "5");
        env::set_var("TRAVEL_MARKETPLACE__REALTIME__RECONCILE_TIMEOUT_MS", "250");
        env::set_var("TRAVEL_MARKETPLACE__LOGGING__ENVIRONMENT", "production");
        env::set_var("TRAVEL_MARKETPLACE__LOGGING__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.backend.timeout_secs, 5);
        assert_eq!(config.realtime.reconcile_timeout(), Duration::from_millis(250));
        assert!(config.is_production());
        assert!(config.logging.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_postgrest_settings_follow_backend() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let postgrest = result.unwrap().postgrest();
        assert_eq!(postgrest.base_url, "https://project.example.co");
        assert_eq!(postgrest.timeout, Duration::from_secs(30));
    }
}
