use serde::{Deserialize, Serialize};

use super::scoring::ScoringWeights;
use super::thresholds::{GodObjectThresholds, RulesConfig, SizeThresholds};

/// Root configuration structure for repodoctor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RepoDoctorConfig {
    /// File and function size thresholds
    #[serde(default)]
    pub size: SizeThresholds,

    /// God object detection thresholds
    #[serde(default)]
    pub god_object: GodObjectThresholds,

    /// Rule switches
    #[serde(default)]
    pub rules: RulesConfig,

    /// Penalty weights for the structural score
    #[serde(default)]
    pub scoring: ScoringWeights,

    /// Ignore patterns
    #[serde(default)]
    pub ignore: IgnoreConfig,
}

impl RepoDoctorConfig {
    /// Fill zero-valued thresholds and weights with their defaults.
    ///
    /// Absent sections and fields are already defaulted by serde; this pass
    /// handles values that are present but zero.
    pub fn merge_with_defaults(mut self) -> Self {
        self.size = self.size.merge_with_defaults();
        self.god_object = self.god_object.merge_with_defaults();
        if let Err(e) = self.scoring.validate() {
            log::warn!("Invalid scoring weights: {}. Falling back to defaults.", e);
        }
        self.scoring.normalize();
        self
    }

    /// Get ignore patterns from configuration
    pub fn get_ignore_patterns(&self) -> Vec<String> {
        self.ignore.patterns.clone()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreConfig {
    #[serde(default)]
    pub patterns: Vec<String>,
}
