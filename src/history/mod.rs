//! Score history and trends.
//!
//! Each analysis run can append its score to
//! `<root>/.repodoctor/history.json`, a JSON array of
//! `{ "timestamp": RFC 3339, "score": f64 }` entries in run order. The trend
//! of a new run is its delta against the most recent recorded entry.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::CONFIG_DIR_NAME;
use crate::errors::{Error, Result};

pub const HISTORY_FILE_NAME: &str = "history.json";

/// Deltas smaller than this are reported as unchanged
const DELTA_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: String,
    pub score: f64,
}

impl HistoryEntry {
    pub fn now(score: f64) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increased,
    Decreased,
    Unchanged,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TrendDirection::Increased => "increased",
            TrendDirection::Decreased => "decreased",
            TrendDirection::Unchanged => "unchanged",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendDelta {
    pub previous: f64,
    pub current: f64,
    pub delta: f64,
    pub direction: TrendDirection,
}

impl TrendDelta {
    pub fn between(previous: f64, current: f64) -> Self {
        let delta = current - previous;
        let direction = if delta > DELTA_EPSILON {
            TrendDirection::Increased
        } else if delta < -DELTA_EPSILON {
            TrendDirection::Decreased
        } else {
            TrendDirection::Unchanged
        };
        Self {
            previous,
            current,
            delta,
            direction,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Current Score: {:.1}\nPrevious Score: {:.1}\nDelta: {:+.1} ({})",
            self.current, self.previous, self.delta, self.direction
        )
    }
}

/// Reads and appends the score history of one project
#[derive(Debug, Clone)]
pub struct TrendAnalyzer {
    history_path: PathBuf,
    entries: Vec<HistoryEntry>,
}

impl TrendAnalyzer {
    /// Load history for the project at `root`
    pub fn load(root: &Path) -> Result<Self> {
        Self::load_from_path(root.join(CONFIG_DIR_NAME).join(HISTORY_FILE_NAME))
    }

    /// Load history from an explicit file.
    ///
    /// A missing file is an empty history. A file that is not a valid
    /// history is logged and treated as empty; it will be replaced on the
    /// next append.
    pub fn load_from_path(history_path: PathBuf) -> Result<Self> {
        let entries = match fs::read_to_string(&history_path) {
            Ok(contents) => parse_history(&contents, &history_path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(Error::file_system(
                    "Failed to read history file",
                    &history_path,
                    e,
                ))
            }
        };

        Ok(Self {
            history_path,
            entries,
        })
    }

    pub fn history_path(&self) -> &Path {
        &self.history_path
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Delta of `current` against the most recent recorded score
    pub fn calculate_delta(&self, current: f64) -> Option<TrendDelta> {
        self.latest()
            .map(|previous| TrendDelta::between(previous.score, current))
    }

    pub fn trend_summary(&self, current: f64) -> Option<String> {
        self.calculate_delta(current).map(|delta| delta.summary())
    }

    /// Record `score` now and persist the whole history
    pub fn append_score(&mut self, score: f64) -> Result<()> {
        self.append_entry(HistoryEntry::now(score))
    }

    pub fn append_entry(&mut self, entry: HistoryEntry) -> Result<()> {
        self.entries.push(entry);
        self.save()
    }

    fn save(&self) -> Result<()> {
        if let Some(dir) = self.history_path.parent() {
            fs::create_dir_all(dir)
                .map_err(|e| Error::file_system("Failed to create history directory", dir, e))?;
        }

        let json = serde_json::to_string_pretty(&self.entries)?;

        fs::write(&self.history_path, json).map_err(|e| {
            Error::file_system("Failed to write history file", &self.history_path, e)
        })?;

        log::debug!(
            "Recorded {} history entries in {}",
            self.entries.len(),
            self.history_path.display()
        );
        Ok(())
    }
}

fn parse_history(contents: &str, path: &Path) -> Vec<HistoryEntry> {
    if contents.trim().is_empty() {
        return Vec::new();
    }

    match serde_json::from_str(contents) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!(
                "Ignoring malformed history file {}: {}",
                path.display(),
                e
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_history_is_empty() {
        let temp = TempDir::new().unwrap();
        let analyzer = TrendAnalyzer::load(temp.path()).unwrap();
        assert!(analyzer.entries().is_empty());
        assert_eq!(analyzer.calculate_delta(80.0), None);
        assert_eq!(analyzer.trend_summary(80.0), None);
    }

    #[test]
    fn test_malformed_history_is_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("history.json");
        fs::write(&path, "{ not json").unwrap();

        let analyzer = TrendAnalyzer::load_from_path(path).unwrap();
        assert!(analyzer.entries().is_empty());
    }

    #[test]
    fn test_delta_against_latest_entry() {
        let temp = TempDir::new().unwrap();
        let mut analyzer = TrendAnalyzer::load(temp.path()).unwrap();
        analyzer
            .append_entry(HistoryEntry {
                timestamp: "2026-01-01T00:00:00+00:00".to_string(),
                score: 70.0,
            })
            .unwrap();
        analyzer.append_score(85.0).unwrap();

        let delta = analyzer.calculate_delta(80.0).unwrap();
        assert_eq!(delta.previous, 85.0);
        assert_eq!(delta.current, 80.0);
        assert_eq!(delta.delta, -5.0);
        assert_eq!(delta.direction, TrendDirection::Decreased);
    }

    #[test]
    fn test_append_persists_and_reloads() {
        let temp = TempDir::new().unwrap();
        let mut analyzer = TrendAnalyzer::load(temp.path()).unwrap();
        analyzer.append_score(90.0).unwrap();
        analyzer.append_score(95.0).unwrap();

        let path = temp.path().join(".repodoctor").join("history.json");
        assert!(path.is_file());

        let reloaded = TrendAnalyzer::load(temp.path()).unwrap();
        let scores: Vec<f64> = reloaded.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![90.0, 95.0]);
        assert!(chrono::DateTime::parse_from_rfc3339(&reloaded.entries()[0].timestamp).is_ok());
    }

    #[test]
    fn test_direction_and_summary() {
        let up = TrendDelta::between(80.0, 90.0);
        assert_eq!(up.direction, TrendDirection::Increased);
        assert_eq!(
            up.summary(),
            "Current Score: 90.0\nPrevious Score: 80.0\nDelta: +10.0 (increased)"
        );

        assert_eq!(
            TrendDelta::between(75.0, 75.0).direction,
            TrendDirection::Unchanged
        );
    }
}
