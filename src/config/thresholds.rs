use serde::{Deserialize, Serialize};

/// File and function length thresholds, in lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeThresholds {
    #[serde(default = "default_max_file_lines")]
    pub max_file_lines: usize,

    #[serde(default = "default_max_function_lines")]
    pub max_function_lines: usize,
}

impl Default for SizeThresholds {
    fn default() -> Self {
        Self {
            max_file_lines: default_max_file_lines(),
            max_function_lines: default_max_function_lines(),
        }
    }
}

impl SizeThresholds {
    /// Zero means "not configured"
    pub fn merge_with_defaults(self) -> Self {
        Self {
            max_file_lines: non_zero_or(self.max_file_lines, default_max_file_lines()),
            max_function_lines: non_zero_or(
                self.max_function_lines,
                default_max_function_lines(),
            ),
        }
    }
}

/// God object detection thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GodObjectThresholds {
    #[serde(default = "default_max_fields")]
    pub max_fields: usize,

    #[serde(default = "default_max_methods")]
    pub max_methods: usize,
}

impl Default for GodObjectThresholds {
    fn default() -> Self {
        Self {
            max_fields: default_max_fields(),
            max_methods: default_max_methods(),
        }
    }
}

impl GodObjectThresholds {
    pub fn merge_with_defaults(self) -> Self {
        Self {
            max_fields: non_zero_or(self.max_fields, default_max_fields()),
            max_methods: non_zero_or(self.max_methods, default_max_methods()),
        }
    }
}

/// Rule enable/disable switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default = "default_rule_enabled")]
    pub enable_size_rule: bool,

    #[serde(default = "default_rule_enabled")]
    pub enable_god_object_rule: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            enable_size_rule: default_rule_enabled(),
            enable_god_object_rule: default_rule_enabled(),
        }
    }
}

fn non_zero_or(value: usize, default: usize) -> usize {
    if value == 0 {
        default
    } else {
        value
    }
}

fn default_max_file_lines() -> usize {
    500
}
fn default_max_function_lines() -> usize {
    80
}
fn default_max_fields() -> usize {
    15
}
fn default_max_methods() -> usize {
    10
}
fn default_rule_enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_thresholds_fall_back() {
        let size = SizeThresholds {
            max_file_lines: 0,
            max_function_lines: 40,
        }
        .merge_with_defaults();
        assert_eq!(size.max_file_lines, 500);
        assert_eq!(size.max_function_lines, 40);

        let god = GodObjectThresholds {
            max_fields: 0,
            max_methods: 0,
        }
        .merge_with_defaults();
        assert_eq!(god, GodObjectThresholds::default());
    }
}
