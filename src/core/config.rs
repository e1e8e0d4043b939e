//! Engine configuration with documented constants
//!
//! All tunables of the decision/learning loop are collected here with a
//! note on how they interact. Loaded from TOML; every key is optional.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{EngineError, Result};

/// Configuration for the adaptive engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === LEARNING ===
    /// Base rate for genome nudges
    ///
    /// The effective step for a turn is `adaptation_rate * effectiveness`,
    /// so a perfect turn moves a parameter 10% of the way toward the
    /// strategy's value at the default of 0.1.
    pub adaptation_rate: f64,

    /// Effectiveness strictly above this counts as a success
    ///
    /// Also partitions the strategy archive. A turn scoring exactly 0.6
    /// is a failure.
    pub success_threshold: f64,

    /// Number of trailing ledger records handed to the evolver
    pub feedback_window: usize,

    // === INNOVATION ===
    /// Records required before innovation can trigger at all
    pub innovation_min_history: usize,

    /// Trailing records inspected for repeated failure
    pub failure_window: usize,

    /// Failures within `failure_window` that trigger innovation
    pub failure_trigger: usize,

    /// Trailing records that must share a primary focus to count as stagnation
    pub stagnation_window: usize,

    /// Innovation level contributed by each novel element (capped at 1.0)
    pub innovation_per_element: f64,

    // === PHASES ===
    /// Last turn of the early game (turns 1..=N)
    pub early_phase_last_turn: u32,

    /// Last turn of the mid game; anything later is late game
    pub mid_phase_last_turn: u32,

    // === TEMPERAMENT ===
    /// Genome value above which a temperament tactic is appended
    ///
    /// Defaults sit below this, so temperament only shows up once
    /// learning has pushed a parameter high.
    pub temperament_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            adaptation_rate: 0.1,
            success_threshold: 0.6,
            feedback_window: 10,

            innovation_min_history: 3,
            failure_window: 5,
            failure_trigger: 3,
            stagnation_window: 3,
            innovation_per_element: 0.3,

            early_phase_last_turn: 5,
            mid_phase_last_turn: 10,

            temperament_threshold: 0.7,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text; missing keys take defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.adaptation_rate) {
            return Err(EngineError::Config(format!(
                "adaptation_rate ({}) must be within [0, 1]",
                self.adaptation_rate
            )));
        }

        if !(0.0..=1.0).contains(&self.success_threshold) {
            return Err(EngineError::Config(format!(
                "success_threshold ({}) must be within [0, 1]",
                self.success_threshold
            )));
        }

        if self.failure_trigger > self.failure_window {
            return Err(EngineError::Config(format!(
                "failure_trigger ({}) cannot exceed failure_window ({})",
                self.failure_trigger, self.failure_window
            )));
        }

        if self.stagnation_window == 0 || self.feedback_window == 0 {
            return Err(EngineError::Config(
                "stagnation_window and feedback_window must be positive".into(),
            ));
        }

        if self.early_phase_last_turn >= self.mid_phase_last_turn {
            return Err(EngineError::Config(format!(
                "early_phase_last_turn ({}) should be < mid_phase_last_turn ({})",
                self.early_phase_last_turn, self.mid_phase_last_turn
            )));
        }

        if self.innovation_per_element < 0.0 {
            return Err(EngineError::Config("innovation_per_element must be non-negative".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = EngineConfig::from_toml_str("adaptation_rate = 0.25\n").unwrap();
        assert_eq!(config.adaptation_rate, 0.25);
        assert_eq!(config.feedback_window, 10);
        assert_eq!(config.success_threshold, 0.6);
    }

    #[test]
    fn test_unknown_toml_keys_ignored() {
        let config = EngineConfig::from_toml_str("future_knob = true\nfailure_window = 6\n").unwrap();
        assert_eq!(config.failure_window, 6);
    }

    #[test]
    fn test_inverted_phase_turns_rejected() {
        let err = EngineConfig::from_toml_str("early_phase_last_turn = 12\n").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let err = EngineConfig::from_toml_str("adaptation_rate = [").unwrap_err();
        assert!(matches!(err, EngineError::Toml(_)));
    }
}
