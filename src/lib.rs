//! repodoctor: architectural health checks for Rust source trees.
//!
//! A run builds a file-level [`DependencyGraph`] from `use` declarations,
//! looks for circular dependencies and upward imports between the handler,
//! service and repo layers, adds size and god-object findings, and folds
//! everything into a 0-100 [`StructuralScore`].

// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod debt;
pub mod errors;
pub mod extraction;
pub mod graph;
pub mod history;
pub mod io;
pub mod metrics;
pub mod organization;
pub mod scoring;

// Re-export commonly used types
pub use crate::core::{
    CircularDependency, CycleViolation, GodObjectViolation, LayerViolation, ModuleImports,
    Severity, SizeViolation, ViolationCounts,
};

pub use crate::debt::{
    circular::{check_circular_dependencies, detect_cycles, format_cycle},
    layers::{check_layers, classify_layer, Layer},
    run_graph_rules, GraphFindings,
};

pub use crate::config::{RepoDoctorConfig, ScoringWeights};
pub use crate::errors::{Error, Result};
pub use crate::graph::DependencyGraph;
pub use crate::history::{TrendAnalyzer, TrendDelta, TrendDirection};
pub use crate::io::output::{OutputFormat, OutputWriter, StructuralReport};
pub use crate::scoring::{calculate_score, explain_score, StructuralScore};
