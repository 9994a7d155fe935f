//! Penalty weights for the structural score

use serde::{Deserialize, Serialize};

/// Penalty applied per violation in each category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    #[serde(default = "default_circular_penalty")]
    pub circular_penalty: f64,

    #[serde(default = "default_layer_penalty")]
    pub layer_penalty: f64,

    #[serde(default = "default_size_penalty")]
    pub size_penalty: f64,

    #[serde(default = "default_god_object_penalty")]
    pub god_object_penalty: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            circular_penalty: default_circular_penalty(),
            layer_penalty: default_layer_penalty(),
            size_penalty: default_size_penalty(),
            god_object_penalty: default_god_object_penalty(),
        }
    }
}

impl ScoringWeights {
    // Pure function: a weight is usable when it is finite and not negative
    pub fn is_valid_weight(weight: f64) -> bool {
        weight.is_finite() && weight >= 0.0
    }

    // Pure function: Validate a single weight with name
    pub fn validate_weight(weight: f64, name: &str) -> Result<(), String> {
        if Self::is_valid_weight(weight) {
            Ok(())
        } else {
            Err(format!(
                "{} penalty must be a non-negative number, got {}",
                name, weight
            ))
        }
    }

    /// Validate all four weights, reporting the first invalid one
    pub fn validate(&self) -> Result<(), String> {
        Self::validate_weight(self.circular_penalty, "Circular")?;
        Self::validate_weight(self.layer_penalty, "Layer")?;
        Self::validate_weight(self.size_penalty, "Size")?;
        Self::validate_weight(self.god_object_penalty, "God object")?;
        Ok(())
    }

    /// Replace zero or invalid weights with their defaults.
    ///
    /// A zero weight is treated as "not configured", matching an absent field.
    pub fn normalize(&mut self) {
        self.circular_penalty = or_default(self.circular_penalty, default_circular_penalty());
        self.layer_penalty = or_default(self.layer_penalty, default_layer_penalty());
        self.size_penalty = or_default(self.size_penalty, default_size_penalty());
        self.god_object_penalty =
            or_default(self.god_object_penalty, default_god_object_penalty());
    }
}

fn or_default(weight: f64, default: f64) -> f64 {
    if ScoringWeights::is_valid_weight(weight) && weight != 0.0 {
        weight
    } else {
        default
    }
}

pub fn default_circular_penalty() -> f64 {
    10.0
}
pub fn default_layer_penalty() -> f64 {
    5.0
}
pub fn default_size_penalty() -> f64 {
    3.0
}
pub fn default_god_object_penalty() -> f64 {
    5.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let weights = ScoringWeights::default();
        assert_eq!(weights.circular_penalty, 10.0);
        assert_eq!(weights.layer_penalty, 5.0);
        assert_eq!(weights.size_penalty, 3.0);
        assert_eq!(weights.god_object_penalty, 5.0);
    }

    #[test]
    fn test_normalize_replaces_zero_and_negative() {
        let mut weights = ScoringWeights {
            circular_penalty: 0.0,
            layer_penalty: -2.0,
            size_penalty: 1.5,
            god_object_penalty: f64::NAN,
        };
        assert!(weights.validate().is_err());

        weights.normalize();
        assert_eq!(weights.circular_penalty, 10.0);
        assert_eq!(weights.layer_penalty, 5.0);
        assert_eq!(weights.size_penalty, 1.5);
        assert_eq!(weights.god_object_penalty, 5.0);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_absent_fields_take_defaults() {
        let weights: ScoringWeights = serde_yaml::from_str("layer_penalty: 7.5").unwrap();
        assert_eq!(weights.layer_penalty, 7.5);
        assert_eq!(weights.circular_penalty, 10.0);
    }
}
