//! Structural health score.
//!
//! The score starts at [`MAX_SCORE`] and loses a fixed penalty per violation
//! in each category:
//!
//! ```text
//! total_penalty = circular * w_circular + layer * w_layer
//!               + size * w_size + god_object * w_god_object
//! total_score   = max(0, 100 - total_penalty)
//! ```
//!
//! Categories are independent; no violation is counted twice and there are
//! no multiplicative terms. [`calculate_score`] is a pure function of its
//! arguments.

use crate::config::ScoringWeights;
use crate::core::ViolationCounts;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

pub const MAX_SCORE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralScore {
    pub total_score: f64,
    pub max_score: f64,
    pub circular_penalty: f64,
    pub layer_penalty: f64,
    pub size_penalty: f64,
    pub god_object_penalty: f64,
    pub circular_count: usize,
    pub layer_count: usize,
    pub size_count: usize,
    pub god_object_count: usize,
    pub violation_count: usize,
}

impl StructuralScore {
    pub fn total_penalty(&self) -> f64 {
        self.circular_penalty + self.layer_penalty + self.size_penalty + self.god_object_penalty
    }

    pub fn has_violations(&self) -> bool {
        self.violation_count > 0
    }

    /// Status band used by the reporters
    pub fn health(&self) -> HealthBand {
        HealthBand::from_score(self.total_score)
    }
}

/// Coarse reading of a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthBand {
    /// 70 and above
    Healthy,
    /// 50 to below 70
    Warning,
    /// Below 50
    Critical,
}

impl HealthBand {
    pub fn from_score(score: f64) -> Self {
        if score < 50.0 {
            HealthBand::Critical
        } else if score < 70.0 {
            HealthBand::Warning
        } else {
            HealthBand::Healthy
        }
    }
}

/// Combine violation counts into a score.
///
/// The result is clamped to `[0, MAX_SCORE]`; penalties beyond 100 give
/// exactly zero.
pub fn calculate_score(counts: ViolationCounts, weights: &ScoringWeights) -> StructuralScore {
    let circular_penalty = counts.circular as f64 * weights.circular_penalty;
    let layer_penalty = counts.layer as f64 * weights.layer_penalty;
    let size_penalty = counts.size as f64 * weights.size_penalty;
    let god_object_penalty = counts.god_object as f64 * weights.god_object_penalty;

    let total_penalty = circular_penalty + layer_penalty + size_penalty + god_object_penalty;

    StructuralScore {
        total_score: (MAX_SCORE - total_penalty).clamp(0.0, MAX_SCORE),
        max_score: MAX_SCORE,
        circular_penalty,
        layer_penalty,
        size_penalty,
        god_object_penalty,
        circular_count: counts.circular,
        layer_count: counts.layer,
        size_count: counts.size,
        god_object_count: counts.god_object,
        violation_count: counts.total(),
    }
}

/// Human-readable breakdown of how a score was reached
pub fn explain_score(score: &StructuralScore, weights: &ScoringWeights) -> String {
    let rows = [
        (
            "Circular Dependencies",
            score.circular_count,
            weights.circular_penalty,
            score.circular_penalty,
        ),
        (
            "Layer Violations",
            score.layer_count,
            weights.layer_penalty,
            score.layer_penalty,
        ),
        (
            "Size Violations",
            score.size_count,
            weights.size_penalty,
            score.size_penalty,
        ),
        (
            "God Objects",
            score.god_object_count,
            weights.god_object_penalty,
            score.god_object_penalty,
        ),
    ];

    let mut out = String::new();
    let _ = writeln!(out, "Structural Score Breakdown:");
    let _ = writeln!(out, "=========================");
    let _ = writeln!(out, "Base Score: {:.1}", score.max_score);
    for (label, count, weight, penalty) in rows {
        let _ = writeln!(
            out,
            "{}: {} violation(s) x {:.1} penalty = {:.1}",
            label, count, weight, penalty
        );
    }
    let _ = writeln!(out, "Total Penalty: {:.1}", score.total_penalty());
    let _ = writeln!(
        out,
        "Final Score: {:.1} / {:.1}",
        score.total_score, score.max_score
    );
    out
}
