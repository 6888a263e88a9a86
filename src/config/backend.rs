//! Hosted backend configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::Environment;

/// Connection settings for the hosted data store
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Project URL, e.g. `https://project.example.co`
    pub url: String,

    /// Public (anon) API key
    pub anon_key: Secret<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl BackendConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate backend configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("BACKEND__URL"));
        }
        if !self.url.starts_with("https://") && !self.url.starts_with("http://") {
            return Err(ValidationError::InvalidBackendUrl);
        }
        if *environment == Environment::Production && !self.url.starts_with("https://") {
            return Err(ValidationError::BackendMustBeHttps);
        }
        if self.anon_key.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("BACKEND__ANON_KEY"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_timeout() -> u64 {
    30
}
