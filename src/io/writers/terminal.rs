use crate::config::ScoringWeights;
use crate::debt::circular::format_cycle;
use crate::io::output::{OutputWriter, StructuralReport};
use crate::scoring::HealthBand;
use colored::*;
use std::io::Write;

const RULE: &str = "───────────────────────────────────────────";

pub struct TerminalWriter<W: Write> {
    writer: W,
    weights: ScoringWeights,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            weights: ScoringWeights::default(),
        }
    }

    /// Weights shown in the score breakdown
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &StructuralReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_score(report)?;
        self.write_summary(report)?;
        self.write_circular(report)?;
        self.write_layer(report)?;
        self.write_god_objects(report)?;
        self.write_size(report)?;
        self.write_breakdown(report)?;
        self.write_trend(report)?;
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn section(&mut self, title: ColoredString) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", title)?;
        writeln!(self.writer, "{}", RULE)?;
        Ok(())
    }

    fn write_header(&mut self, report: &StructuralReport) -> anyhow::Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", "═══════════════════════════════════════════".blue())?;
        writeln!(self.writer, "{}", "     REPODOCTOR STRUCTURAL ANALYSIS REPORT".bold().blue())?;
        writeln!(self.writer, "{}", "═══════════════════════════════════════════".blue())?;
        writeln!(self.writer, "Version: {}", report.version)?;
        writeln!(self.writer, "Path: {}", report.path)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_score(&mut self, report: &StructuralReport) -> anyhow::Result<()> {
        self.section("STRUCTURAL HEALTH SCORE".bold())?;
        let line = format!(
            "{} Score: {:.1} / {:.1}",
            score_indicator(report.score.total_score),
            report.score.total_score,
            report.score.max_score
        );
        let colored_line = match report.score.health() {
            HealthBand::Healthy => line.as_str().green(),
            HealthBand::Warning => line.as_str().yellow(),
            HealthBand::Critical => line.as_str().red(),
        };
        writeln!(self.writer, "{}", colored_line)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, report: &StructuralReport) -> anyhow::Result<()> {
        let score = &report.score;
        self.section("VIOLATIONS SUMMARY".bold())?;
        writeln!(self.writer, "Total Violations: {}", score.violation_count)?;
        writeln!(self.writer, "  - Circular Dependencies: {}", score.circular_count)?;
        writeln!(self.writer, "  - Layer Violations: {}", score.layer_count)?;
        writeln!(self.writer, "  - Size Violations: {}", score.size_count)?;
        writeln!(self.writer, "  - God Objects: {}", score.god_object_count)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_circular(&mut self, report: &StructuralReport) -> anyhow::Result<()> {
        if report.circular.is_empty() {
            return Ok(());
        }

        self.section("CIRCULAR DEPENDENCIES [CRITICAL]".red().bold())?;
        for (i, violation) in report.circular.iter().enumerate() {
            writeln!(self.writer, "[{}] {}", i + 1, format_cycle(&violation.path))?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_layer(&mut self, report: &StructuralReport) -> anyhow::Result<()> {
        if report.layer.is_empty() {
            return Ok(());
        }

        self.section("LAYER VIOLATIONS [HIGH]".red().bold())?;
        for (i, violation) in report.layer.iter().enumerate() {
            writeln!(self.writer, "[{}] {}", i + 1, violation.message)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_god_objects(&mut self, report: &StructuralReport) -> anyhow::Result<()> {
        if report.god_object.is_empty() {
            return Ok(());
        }

        self.section("GOD OBJECT VIOLATIONS [MEDIUM]".yellow().bold())?;
        for (i, violation) in report.god_object.iter().enumerate() {
            writeln!(
                self.writer,
                "[{}] Struct '{}' in {}: {} fields, {} methods",
                i + 1,
                violation.struct_name,
                violation.file,
                violation.field_count,
                violation.method_count
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_size(&mut self, report: &StructuralReport) -> anyhow::Result<()> {
        if report.size.is_empty() {
            return Ok(());
        }

        self.section("SIZE VIOLATIONS [LOW]".cyan().bold())?;
        for (i, violation) in report.size.iter().enumerate() {
            match &violation.function {
                Some(function) => writeln!(
                    self.writer,
                    "[{}] Function '{}' in {}: {} lines (threshold: {})",
                    i + 1,
                    function,
                    violation.file,
                    violation.lines,
                    violation.threshold
                )?,
                None => writeln!(
                    self.writer,
                    "[{}] File {}: {} lines (threshold: {})",
                    i + 1,
                    violation.file,
                    violation.lines,
                    violation.threshold
                )?,
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_breakdown(&mut self, report: &StructuralReport) -> anyhow::Result<()> {
        if !report.has_violations {
            writeln!(
                self.writer,
                "{}",
                "✨ No structural violations detected! Your architecture is clean.".green()
            )?;
            writeln!(self.writer)?;
            return Ok(());
        }

        let score = &report.score;
        let rows = [
            (
                "Circular Penalty:",
                score.circular_penalty,
                score.circular_count,
                self.weights.circular_penalty,
            ),
            (
                "Layer Penalty:",
                score.layer_penalty,
                score.layer_count,
                self.weights.layer_penalty,
            ),
            (
                "Size Penalty:",
                score.size_penalty,
                score.size_count,
                self.weights.size_penalty,
            ),
            (
                "God Object Penalty:",
                score.god_object_penalty,
                score.god_object_count,
                self.weights.god_object_penalty,
            ),
        ];

        self.section("SCORE BREAKDOWN".bold())?;
        writeln!(self.writer, "{:<22}{:.1}", "Base Score:", score.max_score)?;
        for (label, penalty, count, weight) in rows {
            writeln!(
                self.writer,
                "{:<22}-{:.1} ({} violations x {:.1})",
                label, penalty, count, weight
            )?;
        }
        writeln!(self.writer, "{}", RULE)?;
        writeln!(self.writer, "{:<22}{:.1}", "Final Score:", score.total_score)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_trend(&mut self, report: &StructuralReport) -> anyhow::Result<()> {
        let Some(trend) = &report.trend else {
            return Ok(());
        };

        self.section("TREND".bold())?;
        writeln!(self.writer, "{}", trend.summary())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

/// ✓ at 70 and above, ⚠ from 50, ✗ below 50
pub fn score_indicator(score: f64) -> &'static str {
    match HealthBand::from_score(score) {
        HealthBand::Healthy => "✓",
        HealthBand::Warning => "⚠",
        HealthBand::Critical => "✗",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CycleViolation, LayerViolation, Severity, SizeViolation, ViolationCounts};
    use crate::history::TrendDelta;
    use crate::scoring::calculate_score;
    use std::path::Path;

    fn render(report: &StructuralReport) -> String {
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        TerminalWriter::new(&mut buffer).write_report(report).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    fn report_with_violations() -> StructuralReport {
        let score = calculate_score(ViolationCounts::new(1, 1, 1, 0), &ScoringWeights::default());
        StructuralReport::new(
            Path::new("/project"),
            score,
            vec![CycleViolation {
                path: vec!["src/a.rs".to_string(), "src/b.rs".to_string()],
                severity: Severity::Critical,
            }],
            vec![LayerViolation {
                from: "src/repo/db.rs".to_string(),
                to: "src/service/user.rs".to_string(),
                message: "upward".to_string(),
            }],
            vec![SizeViolation {
                file: "src/big.rs".to_string(),
                function: Some("huge".to_string()),
                lines: 120,
                threshold: 80,
            }],
            vec![],
        )
    }

    #[test]
    fn test_score_indicator_bands() {
        assert_eq!(score_indicator(100.0), "✓");
        assert_eq!(score_indicator(70.0), "✓");
        assert_eq!(score_indicator(69.0), "⚠");
        assert_eq!(score_indicator(50.0), "⚠");
        assert_eq!(score_indicator(10.0), "✗");
    }

    #[test]
    fn test_renders_violation_sections() {
        let text = render(&report_with_violations());

        assert!(text.contains("✓ Score: 82.0 / 100.0"));
        assert!(text.contains("Total Violations: 3"));
        assert!(text.contains("CIRCULAR DEPENDENCIES [CRITICAL]"));
        assert!(text.contains("[1] src/a.rs → src/b.rs → src/a.rs"));
        assert!(text.contains("LAYER VIOLATIONS [HIGH]"));
        assert!(text.contains("[1] Function 'huge' in src/big.rs: 120 lines (threshold: 80)"));
        assert!(!text.contains("GOD OBJECT VIOLATIONS"));
        assert!(text.contains("Circular Penalty:     -10.0 (1 violations x 10.0)"));
        assert!(text.contains("Final Score:          82.0"));
    }

    #[test]
    fn test_clean_report_message() {
        let score = calculate_score(ViolationCounts::default(), &ScoringWeights::default());
        let report = StructuralReport::new(Path::new("."), score, vec![], vec![], vec![], vec![]);
        let text = render(&report);

        assert!(text.contains("No structural violations detected"));
        assert!(!text.contains("SCORE BREAKDOWN"));
    }

    #[test]
    fn test_trend_section() {
        let report = report_with_violations().with_trend(Some(TrendDelta::between(90.0, 82.0)));
        let text = render(&report);
        assert!(text.contains("Delta: -8.0 (decreased)"));
    }
}
