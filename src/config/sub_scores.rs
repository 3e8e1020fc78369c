//! Sub-score service configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;
use crate::adapters::sub_scores::HttpSubScoreConfig;

/// Connection settings for the matching service that supplies sub-scores
#[derive(Debug, Clone, Deserialize)]
pub struct SubScoreServiceConfig {
    /// Base URL, e.g. `https://matching.internal`
    pub base_url: String,

    /// Bearer token sent with every request
    pub api_key: Option<Secret<String>>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl SubScoreServiceConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Client settings for `HttpSubScoreProvider`.
    pub fn provider_config(&self) -> HttpSubScoreConfig {
        let config = HttpSubScoreConfig::new(self.base_url.clone()).with_timeout(self.timeout());
        match &self.api_key {
            Some(key) => config.with_api_key(key.clone()),
            None => config,
        }
    }

    /// Validate sub-score service configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired("SUB_SCORES__BASE_URL"));
        }
        let is_https = self.base_url.starts_with("https://");
        if !is_https && !self.base_url.starts_with("http://") {
            return Err(ValidationError::InvalidSubScoreUrl);
        }
        if *environment == Environment::Production && !is_https {
            return Err(ValidationError::SubScoreUrlMustBeHttps);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_timeout() -> u64 {
    10
}
