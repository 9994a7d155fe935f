use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::{CycleViolation, GodObjectViolation, LayerViolation, SizeViolation};
use crate::history::TrendDelta;
use crate::scoring::StructuralScore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Terminal,
}

/// Everything one analysis run reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralReport {
    pub version: String,
    pub path: String,
    pub score: StructuralScore,
    pub circular: Vec<CycleViolation>,
    pub layer: Vec<LayerViolation>,
    pub size: Vec<SizeViolation>,
    pub god_object: Vec<GodObjectViolation>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub trend: Option<TrendDelta>,
    pub has_violations: bool,
}

impl StructuralReport {
    pub fn new(
        path: &Path,
        score: StructuralScore,
        circular: Vec<CycleViolation>,
        layer: Vec<LayerViolation>,
        size: Vec<SizeViolation>,
        god_object: Vec<GodObjectViolation>,
    ) -> Self {
        let has_violations =
            !(circular.is_empty() && layer.is_empty() && size.is_empty() && god_object.is_empty());
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            path: path.display().to_string(),
            score,
            circular,
            layer,
            size,
            god_object,
            trend: None,
            has_violations,
        }
    }

    pub fn with_trend(mut self, trend: Option<TrendDelta>) -> Self {
        self.trend = trend;
        self
    }

    pub fn has_critical(&self) -> bool {
        !self.circular.is_empty()
    }
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &StructuralReport) -> anyhow::Result<()>;
}
