//! Batch scoring configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Largest accepted `max_in_flight`.
const MAX_IN_FLIGHT_CEILING: usize = 64;

/// Batch scoring tuning
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    /// Candidates scored concurrently during score-all and refresh
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,
}

impl ScoringConfig {
    /// Validate scoring configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_in_flight == 0 || self.max_in_flight > MAX_IN_FLIGHT_CEILING {
            return Err(ValidationError::InvalidMaxInFlight {
                value: self.max_in_flight,
                max: MAX_IN_FLIGHT_CEILING,
            });
        }
        Ok(())
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_in_flight: default_max_in_flight(),
        }
    }
}

fn default_max_in_flight() -> usize {
    crate::application::handlers::scoring::DEFAULT_MAX_IN_FLIGHT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ScoringConfig::default();
        assert_eq!(config.max_in_flight, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let config = ScoringConfig { max_in_flight: 0 };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidMaxInFlight { value: 0, .. })
        ));
    }

    #[test]
    fn test_excessive_concurrency_rejected() {
        let config = ScoringConfig { max_in_flight: 65 };
        assert!(config.validate().is_err());
    }
}
