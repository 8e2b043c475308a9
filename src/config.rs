//! Engine configuration.
//!
//! [`EngineConfig`] selects which objective pair the evaluator reports
//! and how aggressively the mutation operator perturbs candidates. It is
//! serde-enabled so it can be loaded alongside experiment settings.

use serde::{Deserialize, Serialize};

use crate::error::{MrcpspError, Result};

/// Objective pair reported by [`crate::ga::MrcpspProblem::evaluate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveSense {
    /// Raw `[makespan, cost]`, lower is better.
    #[default]
    Minimize,
    /// Normalized `[time, cost]` fitness in `[0, 1]`, higher is better.
    Maximize,
}

/// Configuration for the problem facade.
///
/// # Defaults
///
/// ```
/// use u_mrcpsp::config::{EngineConfig, ObjectiveSense};
///
/// let config = EngineConfig::default();
/// assert_eq!(config.sense, ObjectiveSense::Minimize);
/// assert!((config.mutation_rate - 0.1).abs() < 1e-12);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_mrcpsp::config::{EngineConfig, ObjectiveSense};
///
/// let config = EngineConfig::default()
///     .with_sense(ObjectiveSense::Maximize)
///     .with_mutation_rate(0.2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Which objective pair to report.
    pub sense: ObjectiveSense,

    /// Probability that a mutation call actually swaps two keys (0.0–1.0).
    pub mutation_rate: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sense: ObjectiveSense::Minimize,
            mutation_rate: 0.1,
        }
    }
}

impl EngineConfig {
    /// Sets the objective sense.
    pub fn with_sense(mut self, sense: ObjectiveSense) -> Self {
        self.sense = sense;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(MrcpspError::InvalidConfig(format!(
                "mutation_rate must be in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.sense, ObjectiveSense::Minimize);
        assert!((config.mutation_rate - 0.1).abs() < 1e-12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_mutation_rate() {
        assert!(EngineConfig::default()
            .with_mutation_rate(1.5)
            .validate()
            .is_err());
        assert!(EngineConfig::default()
            .with_mutation_rate(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_from_json() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "sense": "maximize", "mutation_rate": 0.2 }"#).unwrap();
        assert_eq!(config.sense, ObjectiveSense::Maximize);
        assert!((config.mutation_rate - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_from_partial_json() {
        let config: EngineConfig = serde_json::from_str(r#"{ "sense": "maximize" }"#).unwrap();
        assert_eq!(config.sense, ObjectiveSense::Maximize);
        assert!((config.mutation_rate - 0.1).abs() < 1e-12);
    }
}
