use crate::io::output::{OutputWriter, StructuralReport};
use std::io::Write;

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &StructuralReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringWeights;
    use crate::core::ViolationCounts;
    use crate::scoring::calculate_score;
    use std::path::Path;

    #[test]
    fn test_writes_camel_case_report_without_trend() {
        let score = calculate_score(ViolationCounts::new(0, 0, 2, 0), &ScoringWeights::default());
        let report = StructuralReport::new(Path::new("proj"), score, vec![], vec![], vec![], vec![]);

        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer).write_report(&report).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

        assert_eq!(json["score"]["totalScore"], 94.0);
        assert_eq!(json["path"], "proj");
        assert_eq!(json["godObject"], serde_json::json!([]));
        assert!(json.get("trend").is_none());
    }
}
