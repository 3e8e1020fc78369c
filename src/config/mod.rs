//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `VETTERATI` prefix and
//! nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use vetterati_scoring::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod error;
mod scoring;
mod server;
mod sub_scores;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use scoring::ScoringConfig;
pub use server::{Environment, LogFormat, ServerConfig};
pub use sub_scores::SubScoreServiceConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Matching service that supplies per-criterion sub-scores
    pub sub_scores: SubScoreServiceConfig,

    /// Batch scoring tuning
    #[serde(default)]
    pub scoring: ScoringConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `VETTERATI` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `VETTERATI__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `VETTERATI__DATABASE__URL=...` -> `database.url = ...`
    /// - `VETTERATI__SCORING__MAX_IN_FLIGHT=16` -> `scoring.max_in_flight = 16`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("VETTERATI")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.sub_scores.validate(&self.server.environment)?;
        self.scoring.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("VETTERATI__DATABASE__URL", "postgresql://test@localhost/test");
        env::set_var("VETTERATI__SUB_SCORES__BASE_URL", "http://matching:9000");
    }

    fn clear_env() {
        for key in [
            "VETTERATI__DATABASE__URL",
            "VETTERATI__SUB_SCORES__BASE_URL",
            "VETTERATI__SUB_SCORES__API_KEY",
            "VETTERATI__SERVER__PORT",
            "VETTERATI__SERVER__ENVIRONMENT",
            "VETTERATI__SERVER__LOG_FORMAT",
            "VETTERATI__SCORING__MAX_IN_FLIGHT",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.database.url, "postgresql://test@localhost/test");
        assert_eq!(config.sub_scores.base_url, "http://matching:9000");
        assert!(config.sub_scores.api_key.is_none());
    }

    #[test]
    fn test_minimal_config_is_valid() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.unwrap().validate().is_ok());
    }

    #[test]
    fn test_defaults_fill_optional_sections() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.scoring.max_in_flight, 8);
        assert_eq!(config.sub_scores.timeout_secs, 10);
    }

    #[test]
    fn test_overrides_are_applied() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("VETTERATI__SERVER__PORT", "3000");
        env::set_var("VETTERATI__SERVER__LOG_FORMAT", "json");
        env::set_var("VETTERATI__SCORING__MAX_IN_FLIGHT", "16");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.log_format, LogFormat::Json);
        assert_eq!(config.scoring.max_in_flight, 16);
    }

    #[test]
    fn test_production_rejects_plain_http_sub_scores() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("VETTERATI__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert!(matches!(
            config.validate(),
            Err(ValidationError::SubScoreUrlMustBeHttps)
        ));
    }

    #[test]
    fn test_missing_database_url_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("VETTERATI__SUB_SCORES__BASE_URL", "http://matching:9000");
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_err());
    }
}
