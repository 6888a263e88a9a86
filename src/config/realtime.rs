//! Realtime sync configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Settings for keeping local views current
#[derive(Debug, Clone, Deserialize)]
pub struct RealtimeConfig {
    /// Upper bound on one reconcile fetch, in milliseconds
    #[serde(default = "default_reconcile_timeout")]
    pub reconcile_timeout_ms: u64,
}

impl RealtimeConfig {
    pub fn reconcile_timeout(&self) -> Duration {
        Duration::from_millis(self.reconcile_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.reconcile_timeout_ms == 0 || self.reconcile_timeout_ms > 60_000 {
            return Err(ValidationError::InvalidReconcileTimeout);
        }
        Ok(())
    }
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            reconcile_timeout_ms: default_reconcile_timeout(),
        }
    }
}

fn default_reconcile_timeout() -> u64 {
    10_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_realtime_defaults() {
        let config = RealtimeConfig::default();
        assert_eq!(config.reconcile_timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = RealtimeConfig {
            reconcile_timeout_ms: 0,
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidReconcileTimeout)
        );
    }
}
