use std::time::Duration;

use crate::ConfigError;

pub const DEFAULT_HANDSHAKE_DELAY: Duration = Duration::from_millis(2000);
pub const DEFAULT_FAILURE_PROBABILITY: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatorConfig {
    /// How long the fake pairing takes before it resolves.
    pub handshake_delay: Duration,
    /// Chance in [0, 1] that a handshake ends in `ConnectionFailed`.
    pub failure_probability: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            handshake_delay: DEFAULT_HANDSHAKE_DELAY,
            failure_probability: DEFAULT_FAILURE_PROBABILITY,
        }
    }
}

impl SimulatorConfig {
    pub fn new(handshake_delay: Duration, failure_probability: f64) -> Result<Self, ConfigError> {
        let config = Self {
            handshake_delay,
            failure_probability,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.failure_probability) {
            return Err(ConfigError::InvalidFailureProbability(self.failure_probability));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_handshake() {
        let config = SimulatorConfig::default();
        assert_eq!(config.handshake_delay, Duration::from_secs(2));
        assert_eq!(config.failure_probability, 0.1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_probability() {
        assert_eq!(
            SimulatorConfig::new(Duration::ZERO, 1.5),
            Err(ConfigError::InvalidFailureProbability(1.5))
        );
        assert!(SimulatorConfig::new(Duration::ZERO, f64::NAN).is_err());
        assert!(SimulatorConfig::new(Duration::ZERO, 0.0).is_ok());
        assert!(SimulatorConfig::new(Duration::ZERO, 1.0).is_ok());
    }
}
