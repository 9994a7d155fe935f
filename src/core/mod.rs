//! Shared data contracts between the analysis core and its collaborators.
//!
//! Extraction produces [`ModuleImports`], the core produces
//! [`CircularDependency`], [`CycleViolation`] and [`LayerViolation`], and the
//! counting collaborators produce [`SizeViolation`] and [`GodObjectViolation`].
//! Scoring only ever sees their counts through [`ViolationCounts`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity attached to each violation category
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node and the nodes it depends on, as handed over by import extraction
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleImports {
    pub node_id: String,
    pub depends_on: Vec<String>,
}

impl ModuleImports {
    pub fn new(node_id: impl Into<String>, depends_on: Vec<String>) -> Self {
        Self {
            node_id: node_id.into(),
            depends_on,
        }
    }
}

/// A closed dependency loop: each node depends on the next, the last on the first
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircularDependency {
    pub cycle: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleViolation {
    pub path: Vec<String>,
    pub severity: Severity,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerViolation {
    pub from: String,
    pub to: String,
    pub message: String,
}

/// A file or function that exceeds its line threshold.
///
/// `function` is `None` for whole-file violations.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SizeViolation {
    pub file: String,
    pub function: Option<String>,
    pub lines: usize,
    pub threshold: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GodObjectViolation {
    pub struct_name: String,
    pub file: String,
    pub field_count: usize,
    pub method_count: usize,
}

/// Per-category violation counts consumed by the scorer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationCounts {
    pub circular: usize,
    pub layer: usize,
    pub size: usize,
    pub god_object: usize,
}

impl ViolationCounts {
    pub fn new(circular: usize, layer: usize, size: usize, god_object: usize) -> Self {
        Self {
            circular,
            layer,
            size,
            god_object,
        }
    }

    pub fn total(&self) -> usize {
        self.circular + self.layer + self.size + self.god_object
    }
}
