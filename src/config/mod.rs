//! Configuration loading for repodoctor.
//!
//! Configuration lives in `<root>/.repodoctor/config.yaml`. Every section and
//! field is optional; absent or zero-valued entries take their defaults.

mod core;
mod loader;
mod scoring;
mod thresholds;

// Re-export scoring types
pub use scoring::{
    default_circular_penalty, default_god_object_penalty, default_layer_penalty,
    default_size_penalty, ScoringWeights,
};

// Re-export threshold types
pub use thresholds::{GodObjectThresholds, RulesConfig, SizeThresholds};

// Re-export core types
pub use self::core::{IgnoreConfig, RepoDoctorConfig};

// Re-export loader functions
pub use loader::{
    config_path, ensure_config_dir, load_config, load_config_from_path,
    parse_and_validate_config, CONFIG_DIR_NAME, CONFIG_FILE_NAME,
};
